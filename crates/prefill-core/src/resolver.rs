// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field policy resolvers.
//!
//! A resolver produces the value written into an unset capability slot.
//!
//! # Overview
//!
//! | Resolver | Kind | Value |
//! |----------|------|-------|
//! | [`Constant`] | Static | A cloned constant (e.g. delete flag `0`) |
//! | [`CurrentIdentity`] | Deferred | Current principal, `""` when nobody is acting |
//! | [`FnResolver`] | Custom | Whatever the closure returns |
//! | `Now` | Deferred | Current UTC time (feature `chrono`) |
//!
//! Resolvers never fail because a value is absent. They return
//! [`ResolutionError`] only when the lookup itself breaks.

use std::{fmt, marker::PhantomData, sync::Arc};

use crate::{
    capability::{Capability, Entity},
    error::ResolutionError,
    identity::IdentityProvider
};

/// Inputs available to a resolver.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    identity: &'a dyn IdentityProvider,
    entity:   &'a dyn Entity
}

impl<'a> ResolveContext<'a> {
    /// Create a context for one resolution.
    pub const fn new(identity: &'a dyn IdentityProvider, entity: &'a dyn Entity) -> Self {
        Self {
            identity,
            entity
        }
    }

    /// Identity provider of the dispatcher.
    pub const fn identity(&self) -> &'a dyn IdentityProvider {
        self.identity
    }

    /// Entity being prepared for its first write.
    pub const fn entity(&self) -> &'a dyn Entity {
        self.entity
    }
}

impl fmt::Debug for ResolveContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolveContext").finish_non_exhaustive()
    }
}

/// Policy producing a default value for capability `C`.
pub trait Resolver<C: Capability>: Send + Sync {
    /// Produce the value to store in an unset slot.
    ///
    /// # Errors
    ///
    /// Only for exceptional lookup failures. Absence of a value is answered
    /// with a default, never with an error.
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<C::Value, ResolutionError>;
}

impl<C: Capability, R: Resolver<C> + ?Sized> Resolver<C> for Arc<R> {
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<C::Value, ResolutionError> {
        (**self).resolve(ctx)
    }
}

impl<C: Capability, R: Resolver<C> + ?Sized> Resolver<C> for Box<R> {
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<C::Value, ResolutionError> {
        (**self).resolve(ctx)
    }
}

/// Static resolver returning a clone of a constant.
///
/// ```rust
/// use prefill_core::Constant;
///
/// let not_deleted = Constant::new(0);
/// assert_eq!(not_deleted.value(), &0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant<V>(V);

impl<V> Constant<V> {
    /// Create a resolver for `value`.
    pub const fn new(value: V) -> Self {
        Self(value)
    }

    /// The constant.
    pub const fn value(&self) -> &V {
        &self.0
    }
}

impl<C> Resolver<C> for Constant<C::Value>
where
    C: Capability,
    C::Value: Clone
{
    fn resolve(&self, _ctx: &ResolveContext<'_>) -> Result<C::Value, ResolutionError> {
        Ok(self.0.clone())
    }
}

/// Deferred resolver reading the current principal.
///
/// Resolves to the empty string when nobody is acting. A provider failure
/// becomes [`ResolutionError::Identity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentIdentity;

impl<C> Resolver<C> for CurrentIdentity
where
    C: Capability<Value = String>
{
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<String, ResolutionError> {
        ctx.identity()
            .current_identity()
            .map(Option::unwrap_or_default)
            .map_err(ResolutionError::identity::<C>)
    }
}

/// Resolver backed by a closure.
///
/// Build with [`from_fn`].
pub struct FnResolver<C, F> {
    f:           F,
    _capability: PhantomData<fn() -> C>
}

/// Wrap a closure as a resolver for capability `C`.
///
/// # Example
///
/// ```rust
/// use prefill_core::{Capability, from_fn};
///
/// struct TenantId;
///
/// impl Capability for TenantId {
///     type Value = String;
///     const NAME: &'static str = "tenant_id";
/// }
///
/// let tenant = from_fn::<TenantId, _>(|_ctx| Ok("acme".to_string()));
/// # let _ = tenant;
/// ```
pub fn from_fn<C, F>(f: F) -> FnResolver<C, F>
where
    C: Capability,
    F: Fn(&ResolveContext<'_>) -> Result<C::Value, ResolutionError> + Send + Sync
{
    FnResolver {
        f,
        _capability: PhantomData
    }
}

impl<C, F> Resolver<C> for FnResolver<C, F>
where
    C: Capability,
    F: Fn(&ResolveContext<'_>) -> Result<C::Value, ResolutionError> + Send + Sync
{
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<C::Value, ResolutionError> {
        (self.f)(ctx)
    }
}

impl<C: Capability, F> fmt::Debug for FnResolver<C, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnResolver").field(&C::NAME).finish()
    }
}

#[cfg(feature = "chrono")]
pub use self::clock::Now;

#[cfg(feature = "chrono")]
mod clock {
    use std::{fmt, sync::Arc};

    use chrono::{DateTime, Utc};

    use super::{ResolveContext, Resolver};
    use crate::{capability::Capability, error::ResolutionError};

    type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

    /// Deferred resolver reading the current UTC time.
    #[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
    #[derive(Clone)]
    pub struct Now {
        clock: Clock
    }

    impl Now {
        /// Resolver using the system clock.
        pub fn new() -> Self {
            Self {
                clock: Arc::new(Utc::now)
            }
        }

        /// Resolver using a custom clock.
        pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
            Self {
                clock: Arc::new(clock)
            }
        }
    }

    impl Default for Now {
        fn default() -> Self {
            Self::new()
        }
    }

    impl fmt::Debug for Now {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Now").finish_non_exhaustive()
        }
    }

    impl<C> Resolver<C> for Now
    where
        C: Capability<Value = DateTime<Utc>>
    {
        fn resolve(&self, _ctx: &ResolveContext<'_>) -> Result<DateTime<Utc>, ResolutionError> {
            Ok((self.clock)())
        }
    }
}
