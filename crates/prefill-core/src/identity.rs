// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Identity providers.
//!
//! The identity provider answers "who is acting right now?" for deferred
//! resolvers such as [`CurrentIdentity`](crate::CurrentIdentity). It is passed
//! to the dispatcher explicitly instead of being looked up from an ambient
//! framework context.
//!
//! # Provided Implementations
//!
//! | Provider | Answer |
//! |----------|--------|
//! | [`Anonymous`] | Always nobody |
//! | [`FixedIdentity`] | Always the same principal (batch jobs, tests) |
//! | [`ScopedIdentity`] | Principal entered on the current thread |
//! | `Fn() -> Result<Option<String>, IdentityError>` | Whatever the closure returns |

use std::{cell::RefCell, marker::PhantomData};

use crate::error::IdentityError;

/// Source of the current acting principal.
///
/// `Ok(None)` means nobody is acting; it is not an error. Return `Err` only
/// when the provider cannot answer at all (backend down, timeout).
///
/// Implementations may block. The dispatcher does not impose a timeout.
pub trait IdentityProvider: Send + Sync {
    /// Identity of the current principal, if any.
    fn current_identity(&self) -> Result<Option<String>, IdentityError>;
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Result<Option<String>, IdentityError> + Send + Sync
{
    fn current_identity(&self) -> Result<Option<String>, IdentityError> {
        self()
    }
}

/// Provider that never knows an identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn current_identity(&self) -> Result<Option<String>, IdentityError> {
        Ok(None)
    }
}

/// Provider that always answers with the same principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdentity(String);

impl FixedIdentity {
    /// Create a provider for `principal`.
    pub fn new(principal: impl Into<String>) -> Self {
        Self(principal.into())
    }
}

impl IdentityProvider for FixedIdentity {
    fn current_identity(&self) -> Result<Option<String>, IdentityError> {
        Ok(Some(self.0.clone()))
    }
}

thread_local! {
    static CURRENT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Thread-scoped principal.
///
/// Request handlers call [`ScopedIdentity::enter`] when they start serving a
/// principal and keep the returned guard alive for the duration of the work.
/// Nested scopes restore the outer principal when the inner guard drops.
///
/// # Example
///
/// ```rust
/// use prefill_core::{IdentityProvider, ScopedIdentity};
///
/// let provider = ScopedIdentity;
/// assert_eq!(provider.current_identity().unwrap(), None);
///
/// {
///     let _guard = ScopedIdentity::enter("alice");
///     assert_eq!(provider.current_identity().unwrap().as_deref(), Some("alice"));
/// }
///
/// assert_eq!(provider.current_identity().unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopedIdentity;

impl ScopedIdentity {
    /// Make `principal` current on this thread until the guard drops.
    #[must_use = "the principal is cleared as soon as the guard is dropped"]
    pub fn enter(principal: impl Into<String>) -> IdentityGuard {
        let previous = CURRENT.with(|slot| slot.replace(Some(principal.into())));
        IdentityGuard {
            previous,
            _thread: PhantomData
        }
    }

    /// Run `f` with `principal` current on this thread.
    pub fn with<R>(principal: impl Into<String>, f: impl FnOnce() -> R) -> R {
        let _guard = Self::enter(principal);
        f()
    }
}

impl IdentityProvider for ScopedIdentity {
    fn current_identity(&self) -> Result<Option<String>, IdentityError> {
        Ok(CURRENT.with(|slot| slot.borrow().clone()))
    }
}

/// Restores the previous thread principal on drop.
///
/// The guard is tied to the thread that entered the scope and cannot be sent
/// to another one, so it also cannot be held across an `.await` inside a
/// future spawned on a multi-threaded runtime:
///
/// ```rust,compile_fail
/// use prefill_core::ScopedIdentity;
///
/// let guard = ScopedIdentity::enter("alice");
/// std::thread::spawn(move || drop(guard));
/// ```
#[derive(Debug)]
pub struct IdentityGuard {
    previous: Option<String>,
    _thread:  PhantomData<*const ()>
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}
