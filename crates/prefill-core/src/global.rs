// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Optional process-wide registry.
//!
//! Applications that prefer one table for the whole process install it once
//! at startup and hand it to their dispatchers. Nothing in this crate reads
//! the global slot implicitly.
//!
//! ```rust,ignore
//! fn main() -> Result<(), prefill::ConfigurationError> {
//!     let registry = prefill::global::install(prefill::Registry::standard())?;
//!     let dispatcher = prefill::Dispatcher::new(registry, prefill::ScopedIdentity);
//!     // ...
//!     Ok(())
//! }
//! ```

use std::sync::{Arc, OnceLock};

use crate::{error::ConfigurationError, registry::Registry};

static REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();

/// Install the process-wide registry.
///
/// # Errors
///
/// [`ConfigurationError::AlreadyInstalled`] on every call after the first.
pub fn install(registry: Registry) -> Result<Arc<Registry>, ConfigurationError> {
    let registry = Arc::new(registry);

    if REGISTRY.set(Arc::clone(&registry)).is_err() {
        tracing::error!("process-wide registry installed twice");
        return Err(ConfigurationError::AlreadyInstalled);
    }

    tracing::debug!(capabilities = registry.len(), "installed process-wide registry");
    Ok(registry)
}

/// The installed registry, if any.
pub fn registry() -> Option<Arc<Registry>> {
    REGISTRY.get().cloned()
}
