// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core traits and dispatcher for prefill.
//!
//! This crate fills shared entity fields (soft-delete flag, creator, updater,
//! optionally timestamps) right before an entity's first durable write. It
//! can be used standalone with manual [`Entity`] implementations; most users
//! should depend on `prefill`, which adds `#[derive(Entity)]`.
//!
//! # Overview
//!
//! - [`Capability`]: A named optional field and its value type
//! - [`Entity`] / [`HasCapability`]: How an entity exposes its slots
//! - [`Resolver`]: Policy producing a default ([`Constant`],
//!   [`CurrentIdentity`], [`from_fn`])
//! - [`IdentityProvider`]: Source of the acting principal
//! - [`Registry`]: Capability → resolver table, frozen after startup
//! - [`Dispatcher`]: Applies the registry to an entity before its first write
//! - [`Store`] / [`Prefilled`]: Persistence seam that dispatches on insert
//!
//! # Usage
//!
//! ```rust,ignore
//! use prefill_core::prelude::*;
//!
//! let registry = Registry::builder()
//!     .register::<DeleteFlag>(Constant::new(0))?
//!     .register::<CreatedBy>(CurrentIdentity)?
//!     .build();
//!
//! let dispatcher = Dispatcher::new(registry, ScopedIdentity);
//! dispatcher.on_write(&mut order, WriteKind::Insert)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod capability;
pub mod dispatcher;
pub mod error;
pub mod global;
pub mod identity;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod store;

/// Re-export async_trait for [`Store`] implementations.
pub use async_trait::async_trait;
#[cfg(feature = "chrono")]
pub use capability::{CreatedAt, UpdatedAt};
pub use capability::{
    Capability, CapabilityId, CreatedBy, DeleteFlag, Entity, FieldMut, FieldRef, HasCapability,
    UpdatedBy
};
pub use dispatcher::{DispatchReport, Dispatcher, WriteKind};
pub use error::{BoxError, ConfigurationError, IdentityError, ResolutionError, WriteError};
pub use identity::{Anonymous, FixedIdentity, IdentityGuard, IdentityProvider, ScopedIdentity};
pub use registry::{Registry, RegistryBuilder};
#[cfg(feature = "chrono")]
pub use resolver::Now;
pub use resolver::{Constant, CurrentIdentity, FnResolver, ResolveContext, Resolver, from_fn};
pub use store::{Prefilled, Store};
