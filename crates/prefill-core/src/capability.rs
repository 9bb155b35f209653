// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Capability interfaces.
//!
//! A capability names one optional shared field (soft-delete flag, creator,
//! updater, ...) together with its value type. Entities opt into any
//! combination of capabilities; there is no base struct to inherit from.
//!
//! # Overview
//!
//! - [`Capability`]: Marker trait: field name + value type
//! - [`CapabilityId`]: Type-erased capability key used by the registry
//! - [`Entity`]: Object-safe slot lookup used by the dispatcher
//! - [`HasCapability`]: Typed accessor pair for one capability
//! - [`FieldRef`] / [`FieldMut`]: Borrowed views of a capability slot
//!
//! # Slots
//!
//! Every capability is backed by exactly one `Option<C::Value>` slot on the
//! entity. `None` means "unset". Both views and the typed accessors borrow the
//! same slot, so reads and writes can never diverge.
//!
//! # Example
//!
//! ```rust
//! use prefill_core::{Capability, CapabilityId, CreatedBy, DeleteFlag, Entity, FieldMut, FieldRef};
//!
//! struct Order {
//!     deleted:    Option<i32>,
//!     created_by: Option<String>
//! }
//!
//! impl Entity for Order {
//!     fn field(&self, capability: CapabilityId) -> Option<FieldRef<'_>> {
//!         if capability == DeleteFlag::id() {
//!             Some(FieldRef::new::<DeleteFlag>(&self.deleted))
//!         } else if capability == CreatedBy::id() {
//!             Some(FieldRef::new::<CreatedBy>(&self.created_by))
//!         } else {
//!             None
//!         }
//!     }
//!
//!     fn field_mut(&mut self, capability: CapabilityId) -> Option<FieldMut<'_>> {
//!         if capability == DeleteFlag::id() {
//!             Some(FieldMut::new::<DeleteFlag>(&mut self.deleted))
//!         } else if capability == CreatedBy::id() {
//!             Some(FieldMut::new::<CreatedBy>(&mut self.created_by))
//!         } else {
//!             None
//!         }
//!     }
//! }
//!
//! let order = Order {
//!     deleted:    None,
//!     created_by: Some("bob".into())
//! };
//! assert!(order.implements(DeleteFlag::id()));
//! assert!(!order.field(DeleteFlag::id()).is_some_and(|f| f.is_set()));
//! ```

use std::{
    any::{Any, TypeId},
    fmt,
    hash::{Hash, Hasher}
};

/// A named optional field an entity may expose.
///
/// Implemented by zero-sized marker types. Declare your own for
/// application-specific fields:
///
/// ```rust
/// use prefill_core::Capability;
///
/// pub struct TenantId;
///
/// impl Capability for TenantId {
///     type Value = String;
///     const NAME: &'static str = "tenant_id";
/// }
/// ```
pub trait Capability: 'static {
    /// Type stored in the entity slot.
    type Value: Send + Sync + 'static;

    /// Stable name used in logs and errors.
    const NAME: &'static str;

    /// Type-erased key for this capability.
    fn id() -> CapabilityId
    where
        Self: Sized
    {
        CapabilityId::of::<Self>()
    }

    /// Read this capability from `entity`.
    fn get<E: HasCapability<Self>>(entity: &E) -> Option<&Self::Value>
    where
        Self: Sized
    {
        HasCapability::<Self>::get(entity)
    }

    /// Write this capability on `entity`.
    fn set<E: HasCapability<Self>>(entity: &mut E, value: Self::Value)
    where
        Self: Sized
    {
        HasCapability::<Self>::set(entity, value);
    }
}

/// Type-erased capability key.
///
/// Equality and hashing use the marker type only; the name is carried for
/// diagnostics.
#[derive(Clone, Copy)]
pub struct CapabilityId {
    type_id: TypeId,
    name:    &'static str
}

impl CapabilityId {
    /// Key for capability `C`.
    pub fn of<C: Capability>() -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name:    C::NAME
        }
    }

    /// Capability name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Check if this key belongs to capability `C`.
    pub fn is<C: Capability>(&self) -> bool {
        self.type_id == TypeId::of::<C>()
    }
}

impl PartialEq for CapabilityId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CapabilityId {}

impl Hash for CapabilityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityId").field(&self.name).finish()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Soft-delete flag. `0` means "not deleted".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DeleteFlag;

impl Capability for DeleteFlag {
    type Value = i32;
    const NAME: &'static str = "delete_flag";
}

/// Identity of the principal that created the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CreatedBy;

impl Capability for CreatedBy {
    type Value = String;
    const NAME: &'static str = "created_by";
}

/// Identity of the principal that last updated the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UpdatedBy;

impl Capability for UpdatedBy {
    type Value = String;
    const NAME: &'static str = "updated_by";
}

/// Creation timestamp.
#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CreatedAt;

#[cfg(feature = "chrono")]
impl Capability for CreatedAt {
    type Value = chrono::DateTime<chrono::Utc>;
    const NAME: &'static str = "created_at";
}

/// Last update timestamp.
#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UpdatedAt;

#[cfg(feature = "chrono")]
impl Capability for UpdatedAt {
    type Value = chrono::DateTime<chrono::Utc>;
    const NAME: &'static str = "updated_at";
}

/// Typed accessor pair for capability `C`.
///
/// Generated by `#[derive(Entity)]` for every marked field. Both methods
/// operate on the slot returned by [`Entity::field`] / [`Entity::field_mut`].
pub trait HasCapability<C: Capability> {
    /// Current value, or `None` when unset.
    fn get(&self) -> Option<&C::Value>;

    /// Store `value` in the slot.
    fn set(&mut self, value: C::Value);
}

/// Entity about to be persisted, seen through its capability slots.
///
/// Returning `None` from [`field`](Entity::field) means the entity does not
/// implement the capability. Implementations must return views of the same
/// slot from both methods for a given capability.
pub trait Entity {
    /// Shared view of the slot backing `capability`.
    fn field(&self, capability: CapabilityId) -> Option<FieldRef<'_>>;

    /// Exclusive view of the slot backing `capability`.
    fn field_mut(&mut self, capability: CapabilityId) -> Option<FieldMut<'_>>;

    /// Check if the entity exposes `capability`.
    fn implements(&self, capability: CapabilityId) -> bool {
        self.field(capability).is_some()
    }
}

/// Shared view of a capability slot.
pub struct FieldRef<'a> {
    capability: CapabilityId,
    is_set:     bool,
    slot:       &'a dyn Any
}

impl<'a> FieldRef<'a> {
    /// Wrap the slot backing capability `C`.
    pub fn new<C: Capability>(slot: &'a Option<C::Value>) -> Self {
        Self {
            capability: CapabilityId::of::<C>(),
            is_set:     slot.is_some(),
            slot
        }
    }

    /// Capability this slot was declared for.
    pub const fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Check if the slot holds a value.
    pub const fn is_set(&self) -> bool {
        self.is_set
    }

    /// Typed slot, or `None` if the slot was declared for another capability.
    pub fn downcast<C: Capability>(self) -> Option<&'a Option<C::Value>> {
        if !self.capability.is::<C>() {
            return None;
        }
        self.slot.downcast_ref()
    }
}

impl fmt::Debug for FieldRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRef")
            .field("capability", &self.capability)
            .field("is_set", &self.is_set)
            .finish_non_exhaustive()
    }
}

/// Exclusive view of a capability slot.
pub struct FieldMut<'a> {
    capability: CapabilityId,
    slot:       &'a mut dyn Any
}

impl<'a> FieldMut<'a> {
    /// Wrap the slot backing capability `C`.
    pub fn new<C: Capability>(slot: &'a mut Option<C::Value>) -> Self {
        Self {
            capability: CapabilityId::of::<C>(),
            slot
        }
    }

    /// Capability this slot was declared for.
    pub const fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Typed slot, or `None` if the slot was declared for another capability.
    pub fn downcast<C: Capability>(self) -> Option<&'a mut Option<C::Value>> {
        if !self.capability.is::<C>() {
            return None;
        }
        self.slot.downcast_mut()
    }
}

impl fmt::Debug for FieldMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMut")
            .field("capability", &self.capability)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Entity exposing all three built-in capabilities.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub(crate) struct Order {
        pub(crate) deleted:    Option<i32>,
        pub(crate) created_by: Option<String>,
        pub(crate) updated_by: Option<String>
    }

    impl Entity for Order {
        fn field(&self, capability: CapabilityId) -> Option<FieldRef<'_>> {
            if capability == DeleteFlag::id() {
                Some(FieldRef::new::<DeleteFlag>(&self.deleted))
            } else if capability == CreatedBy::id() {
                Some(FieldRef::new::<CreatedBy>(&self.created_by))
            } else if capability == UpdatedBy::id() {
                Some(FieldRef::new::<UpdatedBy>(&self.updated_by))
            } else {
                None
            }
        }

        fn field_mut(&mut self, capability: CapabilityId) -> Option<FieldMut<'_>> {
            if capability == DeleteFlag::id() {
                Some(FieldMut::new::<DeleteFlag>(&mut self.deleted))
            } else if capability == CreatedBy::id() {
                Some(FieldMut::new::<CreatedBy>(&mut self.created_by))
            } else if capability == UpdatedBy::id() {
                Some(FieldMut::new::<UpdatedBy>(&mut self.updated_by))
            } else {
                None
            }
        }
    }

    impl HasCapability<CreatedBy> for Order {
        fn get(&self) -> Option<&String> {
            self.created_by.as_ref()
        }

        fn set(&mut self, value: String) {
            self.created_by = Some(value);
        }
    }

    /// Entity that only carries a soft-delete flag.
    #[derive(Debug, Default)]
    pub(crate) struct Tag {
        pub(crate) deleted: Option<i32>
    }

    impl Entity for Tag {
        fn field(&self, capability: CapabilityId) -> Option<FieldRef<'_>> {
            (capability == DeleteFlag::id()).then(|| FieldRef::new::<DeleteFlag>(&self.deleted))
        }

        fn field_mut(&mut self, capability: CapabilityId) -> Option<FieldMut<'_>> {
            (capability == DeleteFlag::id())
                .then(|| FieldMut::new::<DeleteFlag>(&mut self.deleted))
        }
    }

    #[test]
    fn ids_compare_by_type() {
        assert_eq!(DeleteFlag::id(), CapabilityId::of::<DeleteFlag>());
        assert_ne!(CreatedBy::id(), UpdatedBy::id());
        assert!(CreatedBy::id().is::<CreatedBy>());
        assert!(!CreatedBy::id().is::<UpdatedBy>());

        let set: HashSet<_> = [DeleteFlag::id(), DeleteFlag::id(), CreatedBy::id()].into();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn id_display_uses_name() {
        assert_eq!(UpdatedBy::id().to_string(), "updated_by");
        assert_eq!(format!("{:?}", DeleteFlag::id()), "CapabilityId(\"delete_flag\")");
    }

    #[test]
    fn field_views_share_slot() {
        let mut order = Order::default();
        assert!(!order.field(CreatedBy::id()).is_some_and(|f| f.is_set()));

        if let Some(slot) = order.field_mut(CreatedBy::id()).and_then(FieldMut::downcast::<CreatedBy>)
        {
            *slot = Some("alice".into());
        }

        let read = order.field(CreatedBy::id()).and_then(FieldRef::downcast::<CreatedBy>);
        assert_eq!(read, Some(&Some("alice".to_string())));
        assert_eq!(CreatedBy::get(&order), Some(&"alice".to_string()));
    }

    #[test]
    fn downcast_rejects_foreign_capability() {
        let mut order = Order::default();
        let view = order.field(CreatedBy::id());
        assert!(view.and_then(FieldRef::downcast::<UpdatedBy>).is_none());

        let view = order.field_mut(DeleteFlag::id());
        assert!(view.and_then(FieldMut::downcast::<CreatedBy>).is_none());
    }

    #[test]
    fn implements_reflects_exposed_slots() {
        let tag = Tag::default();
        assert!(tag.implements(DeleteFlag::id()));
        assert!(!tag.implements(CreatedBy::id()));
    }

    #[test]
    fn typed_accessors() {
        let mut order = Order::default();
        CreatedBy::set(&mut order, "carol".into());
        assert_eq!(order.created_by.as_deref(), Some("carol"));
    }
}
