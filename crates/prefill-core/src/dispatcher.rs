// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Pre-persist hook dispatcher.
//!
//! The dispatcher runs right before an entity's first durable write. For each
//! registered capability (in registration order) it checks whether the entity
//! exposes the capability, and if the slot is unset, resolves a value and
//! stores it. Slots that already hold a value are never overwritten.
//!
//! # Algorithm
//!
//! ```text
//! for policy in registry (registration order):
//!     entity exposes capability?      no  → skip
//!     slot already set?               yes → untouched
//!     resolve(identity, entity)       err → abort, return ResolutionError
//!     write value into slot           → filled
//! ```
//!
//! # Failure
//!
//! The first resolver failure aborts the hook. Fields filled earlier in the
//! same pass keep their values; the entity has not been written yet, and the
//! caller is expected to abort the write (see [`Prefilled`](crate::Prefilled)).
//!
//! # Concurrency
//!
//! [`Dispatcher`] holds only shared, immutable state. Clone it freely and call
//! it from any number of threads, one entity per call.

use std::{fmt, sync::Arc};

use crate::{
    capability::{Capability, CapabilityId, Entity, FieldMut},
    error::ResolutionError,
    identity::IdentityProvider,
    registry::Registry,
    resolver::{ResolveContext, Resolver}
};

/// Kind of write the persistence layer is about to perform.
///
/// Distinguishing inserts from updates is the persistence layer's job; the
/// dispatcher only trusts this signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteKind {
    /// First durable write of the entity.
    Insert,

    /// Any later write.
    Update
}

impl WriteKind {
    /// Check if this is the entity's first write.
    pub const fn is_first_write(&self) -> bool {
        matches!(self, Self::Insert)
    }
}

/// Per-capability result of applying one policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// Slot was unset and received a resolved value.
    Filled,

    /// Slot already held a value.
    AlreadySet,

    /// Entity does not expose the capability.
    NotExposed
}

/// What a dispatch did to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    filled:    Vec<CapabilityId>,
    untouched: Vec<CapabilityId>
}

impl DispatchReport {
    /// Capabilities that received a default, in dispatch order.
    pub fn filled(&self) -> &[CapabilityId] {
        &self.filled
    }

    /// Exposed capabilities that already held a value.
    pub fn untouched(&self) -> &[CapabilityId] {
        &self.untouched
    }

    /// Check if capability `C` received a default.
    pub fn was_filled<C: Capability>(&self) -> bool {
        self.filled.iter().any(CapabilityId::is::<C>)
    }

    /// Check if nothing was filled.
    pub fn is_empty(&self) -> bool {
        self.filled.is_empty()
    }
}

/// Applies registered default policies to entities before their first write.
///
/// # Example
///
/// ```rust
/// use prefill_core::{Dispatcher, FixedIdentity, Registry};
/// # use prefill_core::{Capability, CapabilityId, CreatedBy, Entity, FieldMut, FieldRef};
/// # struct Post { author: Option<String> }
/// # impl Entity for Post {
/// #     fn field(&self, c: CapabilityId) -> Option<FieldRef<'_>> {
/// #         (c == CreatedBy::id()).then(|| FieldRef::new::<CreatedBy>(&self.author))
/// #     }
/// #     fn field_mut(&mut self, c: CapabilityId) -> Option<FieldMut<'_>> {
/// #         (c == CreatedBy::id()).then(|| FieldMut::new::<CreatedBy>(&mut self.author))
/// #     }
/// # }
///
/// let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("alice"));
///
/// let mut post = Post { author: None };
/// let report = dispatcher.before_first_write(&mut post)?;
///
/// assert!(report.was_filled::<CreatedBy>());
/// assert_eq!(post.author.as_deref(), Some("alice"));
/// # Ok::<(), prefill_core::ResolutionError>(())
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    identity: Arc<dyn IdentityProvider>
}

impl Dispatcher {
    /// Create a dispatcher over `registry` using `identity` for deferred
    /// lookups.
    pub fn new(
        registry: impl Into<Arc<Registry>>,
        identity: impl IdentityProvider + 'static
    ) -> Self {
        Self::with_shared_identity(registry, Arc::new(identity))
    }

    /// Create a dispatcher with an already shared identity provider.
    pub fn with_shared_identity(
        registry: impl Into<Arc<Registry>>,
        identity: Arc<dyn IdentityProvider>
    ) -> Self {
        Self {
            registry: registry.into(),
            identity
        }
    }

    /// Registry this dispatcher reads.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Fill unset capability slots on `entity`.
    ///
    /// Must be called exactly once per entity, immediately before its first
    /// durable write. Calling it again is harmless: slots filled by the first
    /// call are already set and stay unchanged.
    ///
    /// # Errors
    ///
    /// [`ResolutionError`] from the first failing resolver. Remaining
    /// capabilities are not visited.
    pub fn before_first_write(
        &self,
        entity: &mut dyn Entity
    ) -> Result<DispatchReport, ResolutionError> {
        let mut report = DispatchReport::default();

        for policy in self.registry.policies() {
            let capability = policy.capability();
            match policy.apply(entity, self.identity.as_ref()) {
                Ok(Outcome::Filled) => {
                    tracing::debug!(%capability, "filled default");
                    report.filled.push(capability);
                }
                Ok(Outcome::AlreadySet) => {
                    tracing::trace!(%capability, "value already set");
                    report.untouched.push(capability);
                }
                Ok(Outcome::NotExposed) => {}
                Err(err) => {
                    tracing::warn!(%capability, error = %err, "default resolution failed");
                    return Err(err);
                }
            }
        }

        Ok(report)
    }

    /// Run the hook if `kind` is the entity's first write.
    ///
    /// Updates never touch the entity and return an empty report.
    ///
    /// # Errors
    ///
    /// See [`before_first_write`](Self::before_first_write).
    pub fn on_write(
        &self,
        entity: &mut dyn Entity,
        kind: WriteKind
    ) -> Result<DispatchReport, ResolutionError> {
        if !kind.is_first_write() {
            return Ok(DispatchReport::default());
        }
        self.before_first_write(entity)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Apply one policy for capability `C` to `entity`.
pub(crate) fn fill<C: Capability>(
    resolver: &dyn Resolver<C>,
    entity: &mut dyn Entity,
    identity: &dyn IdentityProvider
) -> Result<Outcome, ResolutionError> {
    let id = C::id();

    let is_set = match entity.field(id) {
        None => return Ok(Outcome::NotExposed),
        Some(field) => {
            let declared = field.capability();
            match field.downcast::<C>() {
                Some(slot) => slot.is_some(),
                None => {
                    tracing::warn!(
                        capability = C::NAME,
                        %declared,
                        "entity returned a slot declared for another capability, skipping"
                    );
                    return Ok(Outcome::NotExposed);
                }
            }
        }
    };

    if is_set {
        return Ok(Outcome::AlreadySet);
    }

    let value = resolver.resolve(&ResolveContext::new(identity, &*entity))?;

    match entity.field_mut(id).and_then(FieldMut::downcast::<C>) {
        Some(slot) => {
            *slot = Some(value);
            Ok(Outcome::Filled)
        }
        None => {
            tracing::warn!(capability = C::NAME, "slot vanished between read and write");
            Ok(Outcome::NotExposed)
        }
    }
}
