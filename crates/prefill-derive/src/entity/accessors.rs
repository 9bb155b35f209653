// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Capability accessor generation.
//!
//! # Generated Code
//!
//! For an entity:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! pub struct Order {
//!     #[soft_delete]
//!     pub deleted: Option<i32>,
//! }
//! ```
//!
//! generates:
//!
//! ```rust,ignore
//! impl ::prefill::Entity for Order {
//!     fn field(&self, capability: ::prefill::CapabilityId) -> Option<::prefill::FieldRef<'_>> {
//!         if capability == <::prefill::DeleteFlag as ::prefill::Capability>::id() {
//!             return Some(::prefill::FieldRef::new::<::prefill::DeleteFlag>(&self.deleted));
//!         }
//!         None
//!     }
//!     // field_mut: same shape with FieldMut
//! }
//!
//! impl ::prefill::HasCapability<::prefill::DeleteFlag> for Order {
//!     fn get(&self) -> Option<&i32> { self.deleted.as_ref() }
//!     fn set(&mut self, value: i32) { self.deleted = Some(value); }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::EntityDef;

/// Generates `impl Entity` and one `impl HasCapability<C>` per slot.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let entity_impl = generate_entity_impl(entity);
    let typed_impls = generate_typed_impls(entity);

    quote! {
        #entity_impl
        #typed_impls
    }
}

fn generate_entity_impl(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let krate = &entity.krate;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    let lookups: Vec<TokenStream> = entity
        .slots
        .iter()
        .map(|slot| {
            let field = &slot.ident;
            let cap = slot.capability.to_type(krate);
            quote! {
                if capability == <#cap as #krate::Capability>::id() {
                    return ::core::option::Option::Some(#krate::FieldRef::new::<#cap>(&self.#field));
                }
            }
        })
        .collect();

    let lookups_mut: Vec<TokenStream> = entity
        .slots
        .iter()
        .map(|slot| {
            let field = &slot.ident;
            let cap = slot.capability.to_type(krate);
            quote! {
                if capability == <#cap as #krate::Capability>::id() {
                    return ::core::option::Option::Some(#krate::FieldMut::new::<#cap>(&mut self.#field));
                }
            }
        })
        .collect();

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::Entity for #ident #ty_generics #where_clause {
            fn field(
                &self,
                capability: #krate::CapabilityId
            ) -> ::core::option::Option<#krate::FieldRef<'_>> {
                #(#lookups)*
                let _ = capability;
                ::core::option::Option::None
            }

            fn field_mut(
                &mut self,
                capability: #krate::CapabilityId
            ) -> ::core::option::Option<#krate::FieldMut<'_>> {
                #(#lookups_mut)*
                let _ = capability;
                ::core::option::Option::None
            }
        }
    }
}

fn generate_typed_impls(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let krate = &entity.krate;
    let (impl_generics, ty_generics, where_clause) = entity.generics.split_for_impl();

    let impls = entity.slots.iter().map(|slot| {
        let field = &slot.ident;
        let cap = slot.capability.to_type(krate);
        quote! {
            #[automatically_derived]
            impl #impl_generics #krate::HasCapability<#cap> for #ident #ty_generics #where_clause {
                fn get(&self) -> ::core::option::Option<&<#cap as #krate::Capability>::Value> {
                    ::core::option::Option::as_ref(&self.#field)
                }

                fn set(&mut self, value: <#cap as #krate::Capability>::Value) {
                    self.#field = ::core::option::Option::Some(value);
                }
            }
        }
    });

    quote! { #(#impls)* }
}
