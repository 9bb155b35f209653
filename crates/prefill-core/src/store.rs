// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persistence seam.
//!
//! [`Store`] is the contract a persistence layer exposes; this crate never
//! implements storage itself. [`Prefilled`] wraps any store and runs the
//! dispatcher before inserts only. Updates pass straight through.
//!
//! # Failure Policy
//!
//! If defaults cannot be resolved, the insert is aborted and the wrapped store
//! is never called, so no partially defaulted entity reaches storage.
//!
//! # Example
//!
//! ```rust,ignore
//! let users = Prefilled::new(PgUserStore::new(pool), dispatcher);
//!
//! // created_by / updated_by / deleted are filled here
//! let user = users.insert(User::new("alice@example.com")).await?;
//!
//! // no defaults on update
//! users.update(user).await?;
//! ```

use async_trait::async_trait;

use crate::{
    capability::Entity,
    dispatcher::{Dispatcher, WriteKind},
    error::WriteError
};

/// Persistence contract for entities of type `E`.
#[async_trait]
pub trait Store<E: Send + 'static>: Send + Sync {
    /// Error type for store operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// First durable write of `entity`.
    async fn insert(&self, entity: E) -> Result<E, Self::Error>;

    /// Subsequent write of an already stored `entity`.
    async fn update(&self, entity: E) -> Result<E, Self::Error>;
}

/// Store wrapper that fills defaults before inserts.
#[derive(Debug, Clone)]
pub struct Prefilled<S> {
    store:      S,
    dispatcher: Dispatcher
}

impl<S> Prefilled<S> {
    /// Wrap `store`, filling defaults with `dispatcher`.
    pub const fn new(store: S, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher
        }
    }

    /// Wrapped store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Dispatcher used before inserts.
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Unwrap the inner store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[async_trait]
impl<E, S> Store<E> for Prefilled<S>
where
    E: Entity + Send + 'static,
    S: Store<E>
{
    type Error = WriteError<S::Error>;

    async fn insert(&self, mut entity: E) -> Result<E, Self::Error> {
        let report = self.dispatcher.on_write(&mut entity, WriteKind::Insert)?;
        tracing::debug!(filled = report.filled().len(), "defaults applied before insert");
        self.store.insert(entity).await.map_err(WriteError::Store)
    }

    async fn update(&self, entity: E) -> Result<E, Self::Error> {
        self.store.update(entity).await.map_err(WriteError::Store)
    }
}
