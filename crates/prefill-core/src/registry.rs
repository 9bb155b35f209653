// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Capability → resolver registry.
//!
//! The registry is assembled once during process initialization with
//! [`RegistryBuilder`] and frozen by [`RegistryBuilder::build`]. A frozen
//! [`Registry`] has no mutating methods, so it can be shared across threads
//! (usually as `Arc<Registry>`) and read without locks.
//!
//! Registration order is preserved and defines the order in which the
//! dispatcher visits capabilities.
//!
//! # Example
//!
//! ```rust
//! use prefill_core::{Constant, CreatedBy, CurrentIdentity, DeleteFlag, Registry};
//!
//! let registry = Registry::builder()
//!     .register::<DeleteFlag>(Constant::new(0))?
//!     .register::<CreatedBy>(CurrentIdentity)?
//!     .build();
//!
//! assert_eq!(registry.len(), 2);
//! assert!(registry.lookup::<DeleteFlag>().is_some());
//! # Ok::<(), prefill_core::ConfigurationError>(())
//! ```

use std::{any::Any, fmt};

use crate::{
    capability::{Capability, CapabilityId, Entity},
    dispatcher::{Outcome, fill},
    error::{ConfigurationError, ResolutionError},
    identity::IdentityProvider,
    resolver::Resolver
};

/// Type-erased registry entry.
pub(crate) trait Policy: Send + Sync {
    /// Capability this entry resolves.
    fn capability(&self) -> CapabilityId;

    /// Fill the capability on `entity` if it is exposed and unset.
    fn apply(
        &self,
        entity: &mut dyn Entity,
        identity: &dyn IdentityProvider
    ) -> Result<Outcome, ResolutionError>;

    fn as_any(&self) -> &dyn Any;
}

struct Entry<C: Capability> {
    resolver: Box<dyn Resolver<C>>
}

impl<C: Capability> Policy for Entry<C> {
    fn capability(&self) -> CapabilityId {
        C::id()
    }

    fn apply(
        &self,
        entity: &mut dyn Entity,
        identity: &dyn IdentityProvider
    ) -> Result<Outcome, ResolutionError> {
        fill::<C>(self.resolver.as_ref(), entity, identity)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Frozen capability → resolver table.
pub struct Registry {
    entries: Vec<Box<dyn Policy>>
}

impl Registry {
    /// Start assembling a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the built-in policies.
    ///
    /// See [`RegistryBuilder::standard`].
    pub fn standard() -> Self {
        RegistryBuilder::standard().build()
    }

    /// Resolver registered for capability `C`.
    ///
    /// Returns `None` when no policy is defined; the dispatcher then skips
    /// the capability entirely.
    pub fn lookup<C: Capability>(&self) -> Option<&dyn Resolver<C>> {
        self.entries
            .iter()
            .find_map(|entry| entry.as_any().downcast_ref::<Entry<C>>())
            .map(|entry| entry.resolver.as_ref())
    }

    /// Check if a policy is registered for `capability`.
    pub fn contains(&self, capability: CapabilityId) -> bool {
        self.entries.iter().any(|entry| entry.capability() == capability)
    }

    /// Registered capabilities in registration order.
    pub fn capabilities(&self) -> impl Iterator<Item = CapabilityId> + '_ {
        self.entries.iter().map(|entry| entry.capability())
    }

    /// Number of registered capabilities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn policies(&self) -> &[Box<dyn Policy>] {
        &self.entries
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capabilities", &self.capabilities().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Registry`].
///
/// Used only during initialization. Registering a capability twice is a
/// [`ConfigurationError`].
#[derive(Default)]
pub struct RegistryBuilder {
    entries: Vec<Box<dyn Policy>>
}

impl RegistryBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pre-loaded with the built-in policies.
    ///
    /// | Capability | Resolver |
    /// |------------|----------|
    /// | `DeleteFlag` | `Constant(0)` |
    /// | `CreatedBy` | `CurrentIdentity` |
    /// | `UpdatedBy` | `CurrentIdentity` |
    /// | `CreatedAt` | `Now` (feature `chrono`) |
    /// | `UpdatedAt` | `Now` (feature `chrono`) |
    pub fn standard() -> Self {
        use crate::{
            capability::{CreatedBy, DeleteFlag, UpdatedBy},
            resolver::{Constant, CurrentIdentity}
        };

        let builder = Self::new()
            .push::<DeleteFlag>(Constant::new(0))
            .push::<CreatedBy>(CurrentIdentity)
            .push::<UpdatedBy>(CurrentIdentity);

        #[cfg(feature = "chrono")]
        let builder = {
            use crate::{
                capability::{CreatedAt, UpdatedAt},
                resolver::Now
            };
            builder.push::<CreatedAt>(Now::new()).push::<UpdatedAt>(Now::new())
        };

        builder
    }

    /// Register `resolver` for capability `C`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::DuplicateCapability`] if `C` already has a
    /// resolver.
    pub fn register<C: Capability>(
        self,
        resolver: impl Resolver<C> + 'static
    ) -> Result<Self, ConfigurationError> {
        if self.contains(C::id()) {
            return Err(ConfigurationError::DuplicateCapability {
                capability: C::NAME
            });
        }
        tracing::debug!(capability = C::NAME, "registered default policy");
        Ok(self.push::<C>(resolver))
    }

    /// Check if a policy is already registered for `capability`.
    pub fn contains(&self, capability: CapabilityId) -> bool {
        self.entries.iter().any(|entry| entry.capability() == capability)
    }

    /// Freeze the registry.
    pub fn build(self) -> Registry {
        Registry {
            entries: self.entries
        }
    }

    fn push<C: Capability>(mut self, resolver: impl Resolver<C> + 'static) -> Self {
        self.entries.push(Box::new(Entry::<C> {
            resolver: Box::new(resolver)
        }));
        self
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let capabilities: Vec<_> = self.entries.iter().map(|e| e.capability()).collect();
        f.debug_struct("RegistryBuilder")
            .field("capabilities", &capabilities)
            .finish()
    }
}
