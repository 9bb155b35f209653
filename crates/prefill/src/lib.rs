// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

//! # prefill
//!
//! Fill soft-delete flags and audit fields on entities right before their
//! first durable write. Re-exports:
//! - [`Entity`](macro@Entity) derive macro from `prefill-derive`
//!   (feature `derive`, on by default)
//! - All types from `prefill-core` ([`Dispatcher`], [`Registry`],
//!   [`Prefilled`], ...)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use prefill::{Dispatcher, Entity, Registry, ScopedIdentity};
//!
//! #[derive(Entity, Default)]
//! pub struct Invoice {
//!     pub number: String,
//!     #[soft_delete]
//!     pub deleted: Option<i32>,
//!     #[created_by]
//!     pub created_by: Option<String>,
//! }
//!
//! let dispatcher = Dispatcher::new(Registry::standard(), ScopedIdentity);
//!
//! let _user = ScopedIdentity::enter("alice");
//! let mut invoice = Invoice::default();
//! dispatcher.before_first_write(&mut invoice)?;
//! assert_eq!(invoice.deleted, Some(0));
//! assert_eq!(invoice.created_by.as_deref(), Some("alice"));
//! ```

pub use prefill_core::*;
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use prefill_derive::Entity;
