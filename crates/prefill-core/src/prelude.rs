// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prefill_core::prelude::*;
//! ```

#[cfg(feature = "chrono")]
pub use crate::{CreatedAt, Now, UpdatedAt};
pub use crate::{
    Capability, Constant, CreatedBy, CurrentIdentity, DeleteFlag, DispatchReport, Dispatcher,
    Entity, HasCapability, IdentityProvider, Prefilled, Registry, ResolutionError, Resolver,
    ScopedIdentity, Store, UpdatedBy, WriteKind, async_trait, from_fn
};
