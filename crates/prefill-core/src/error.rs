// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for prefill.
//!
//! # Overview
//!
//! - [`ConfigurationError`]: Registry misconfiguration, fatal at startup
//! - [`ResolutionError`]: A resolver failed while filling a field
//! - [`IdentityError`]: The identity provider could not answer
//! - [`WriteError`]: Store adapter error (resolution or store)
//!
//! An identity provider answering "nobody" is not an error; only a provider
//! that cannot answer at all produces [`IdentityError`].

use thiserror::Error;

use crate::capability::Capability;

/// Boxed error used for resolver and provider failures of arbitrary origin.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registry configuration error.
///
/// Raised while the registry is being assembled. A process must not start
/// dispatching with an ambiguous policy table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The same capability was registered twice.
    #[error("capability `{capability}` is already registered")]
    DuplicateCapability {
        /// Name of the capability.
        capability: &'static str
    },

    /// A process-wide registry was already installed.
    #[error("a process-wide registry is already installed")]
    AlreadyInstalled
}

/// Failure reported by an [`IdentityProvider`](crate::IdentityProvider).
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The provider backend is unreachable or timed out.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// Any other provider failure.
    #[error(transparent)]
    Other(BoxError)
}

/// A resolver failed exceptionally.
///
/// Aborts the pre-write hook for the entity being dispatched. Other entities
/// and later calls are unaffected.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The identity lookup behind a deferred resolver failed.
    #[error("failed to resolve `{capability}`: {source}")]
    Identity {
        /// Name of the capability being resolved.
        capability: &'static str,
        /// Provider failure.
        #[source]
        source:     IdentityError
    },

    /// A custom resolver failed.
    #[error("failed to resolve `{capability}`: {source}")]
    Failed {
        /// Name of the capability being resolved.
        capability: &'static str,
        /// Underlying failure.
        #[source]
        source:     BoxError
    }
}

impl ResolutionError {
    /// Wrap an identity provider failure for capability `C`.
    pub fn identity<C: Capability>(source: IdentityError) -> Self {
        Self::Identity {
            capability: C::NAME,
            source
        }
    }

    /// Wrap an arbitrary resolver failure for capability `C`.
    pub fn failed<C: Capability>(source: impl Into<BoxError>) -> Self {
        Self::Failed {
            capability: C::NAME,
            source:     source.into()
        }
    }

    /// Name of the capability whose resolution failed.
    pub const fn capability(&self) -> &'static str {
        match self {
            Self::Identity {
                capability, ..
            }
            | Self::Failed {
                capability, ..
            } => *capability
        }
    }

    /// Check if the failure came from the identity provider.
    pub const fn is_identity(&self) -> bool {
        matches!(self, Self::Identity { .. })
    }
}

/// Error type for writes going through [`Prefilled`](crate::Prefilled).
#[derive(Debug, Error)]
pub enum WriteError<E> {
    /// Defaults could not be resolved; the write was not attempted.
    #[error("pre-write defaults failed: {0}")]
    Resolution(#[source] ResolutionError),

    /// The underlying store rejected the write.
    #[error("store error: {0}")]
    Store(#[source] E)
}

impl<E> WriteError<E> {
    /// Check if this is a resolution error.
    pub const fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }

    /// Check if this is a store error.
    pub const fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl<E> From<ResolutionError> for WriteError<E> {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;
    use crate::capability::{CreatedBy, DeleteFlag};

    #[test]
    fn duplicate_capability_display() {
        let err = ConfigurationError::DuplicateCapability {
            capability: "delete_flag"
        };
        assert_eq!(err.to_string(), "capability `delete_flag` is already registered");
    }

    #[test]
    fn resolution_error_carries_capability() {
        let err = ResolutionError::identity::<CreatedBy>(IdentityError::Unavailable(
            "connection refused".into()
        ));
        assert_eq!(err.capability(), "created_by");
        assert!(err.is_identity());
        assert_eq!(
            err.to_string(),
            "failed to resolve `created_by`: identity provider unavailable: connection refused"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn resolution_error_failed() {
        let err = ResolutionError::failed::<DeleteFlag>("boom");
        assert_eq!(err.capability(), "delete_flag");
        assert!(!err.is_identity());
    }

    #[test]
    fn identity_other_is_transparent() {
        let inner: BoxError = Box::new(std::io::Error::other("ldap bind rejected"));
        let err = IdentityError::Other(inner);
        assert_eq!(err.to_string(), "ldap bind rejected");

        let err = ResolutionError::identity::<CreatedBy>(err);
        assert!(err.is_identity());
        assert_eq!(err.to_string(), "failed to resolve `created_by`: ldap bind rejected");
    }

    #[test]
    fn write_error_kinds() {
        let res: WriteError<std::io::Error> =
            ResolutionError::failed::<DeleteFlag>("boom").into();
        assert!(res.is_resolution());
        assert!(!res.is_store());

        let store: WriteError<std::io::Error> = WriteError::Store(std::io::Error::other("disk"));
        assert!(store.is_store());
        assert_eq!(store.to_string(), "store error: disk");
    }
}
