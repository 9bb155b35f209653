// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Procedural macros for prefill.
//!
//! Use the `prefill` crate, which re-exports the derive together with the
//! runtime traits it implements.
//!
//! # Attribute Quick Reference
//!
//! ## Struct-Level `#[prefill(...)]`
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[prefill(crate = "prefill_core")] // Optional: runtime crate path (default: "::prefill")
//! pub struct Order { /* ... */ }
//! ```
//!
//! ## Field-Level Markers
//!
//! ```rust,ignore
//! pub struct Order {
//!     pub id: u64,                      // Unmarked fields are ignored
//!
//!     #[soft_delete]                    // DeleteFlag
//!     pub deleted: Option<i32>,
//!
//!     #[created_by]                     // CreatedBy
//!     pub creator: Option<String>,
//!
//!     #[updated_by]                     // UpdatedBy
//!     pub updater: Option<String>,
//!
//!     #[created_at]                     // CreatedAt (feature "chrono")
//!     pub created: Option<DateTime<Utc>>,
//!
//!     #[updated_at]                     // UpdatedAt (feature "chrono")
//!     pub updated: Option<DateTime<Utc>>,
//!
//!     #[capability(TenantId)]           // Any user-defined capability
//!     pub tenant: Option<String>,
//! }
//! ```

mod entity;

use proc_macro::TokenStream;

/// Derive macro exposing marked fields as capability slots.
///
/// # Overview
///
/// Generates:
///
/// - **`impl Entity`**: slot lookup used by the dispatcher
/// - **`impl HasCapability<C>`**: one typed accessor pair per marked field
///
/// # Field Markers
///
/// | Attribute | Capability | Slot type |
/// |-----------|------------|-----------|
/// | `#[soft_delete]` | `DeleteFlag` | `Option<i32>` |
/// | `#[created_by]` | `CreatedBy` | `Option<String>` |
/// | `#[updated_by]` | `UpdatedBy` | `Option<String>` |
/// | `#[created_at]` | `CreatedAt` | `Option<DateTime<Utc>>` |
/// | `#[updated_at]` | `UpdatedAt` | `Option<DateTime<Utc>>` |
/// | `#[capability(Path)]` | `Path` | `Option<<Path as Capability>::Value>` |
///
/// # Errors
///
/// Compilation fails when:
///
/// - the input is not a struct with named fields
/// - a marked field is not declared as `Option<_>`
/// - a field carries more than one marker
/// - two fields are marked with the same capability
///
/// # Example
///
/// ```rust,ignore
/// use prefill::{Entity, Dispatcher, Registry, FixedIdentity};
///
/// #[derive(Entity, Default)]
/// pub struct Invoice {
///     pub number: String,
///
///     #[soft_delete]
///     pub deleted: Option<i32>,
///
///     #[created_by]
///     pub created_by: Option<String>,
/// }
///
/// let dispatcher = Dispatcher::new(Registry::standard(), FixedIdentity::new("alice"));
/// let mut invoice = Invoice::default();
/// dispatcher.before_first_write(&mut invoice)?;
/// assert_eq!(invoice.created_by.as_deref(), Some("alice"));
/// ```
#[proc_macro_derive(
    Entity,
    attributes(prefill, soft_delete, created_by, updated_by, created_at, updated_at, capability)
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}
