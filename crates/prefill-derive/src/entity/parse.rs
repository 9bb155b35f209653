// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for `#[derive(Entity)]`.
//!
//! # Supported Attributes
//!
//! | Attribute | Level | Description |
//! |-----------|-------|-------------|
//! | `#[prefill(crate = "path")]` | struct | Runtime crate path, default `::prefill` |
//! | `#[soft_delete]` | field | `DeleteFlag` slot |
//! | `#[created_by]` | field | `CreatedBy` slot |
//! | `#[updated_by]` | field | `UpdatedBy` slot |
//! | `#[created_at]` | field | `CreatedAt` slot |
//! | `#[updated_at]` | field | `UpdatedAt` slot |
//! | `#[capability(Path)]` | field | Slot for a user-defined capability |

use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DeriveInput, Field, Generics, Ident, Path, PathArguments, Type};

/// Returns the default runtime crate path.
///
/// Used by darling for the `crate` attribute default.
pub fn default_crate_path() -> Path {
    syn::parse_quote!(::prefill)
}

/// Struct-level attributes parsed from `#[prefill(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(prefill), supports(struct_named))]
struct EntityAttrs {
    ident: Ident,

    generics: Generics,

    /// Path of the runtime crate in generated code.
    #[darling(rename = "crate", default = "default_crate_path")]
    krate: Path
}

/// Built-in capability markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `#[soft_delete]` → `DeleteFlag`
    SoftDelete,
    /// `#[created_by]` → `CreatedBy`
    CreatedBy,
    /// `#[updated_by]` → `UpdatedBy`
    UpdatedBy,
    /// `#[created_at]` → `CreatedAt`
    CreatedAt,
    /// `#[updated_at]` → `UpdatedAt`
    UpdatedAt
}

impl Builtin {
    const ALL: [Self; 5] = [
        Self::SoftDelete,
        Self::CreatedBy,
        Self::UpdatedBy,
        Self::CreatedAt,
        Self::UpdatedAt
    ];

    /// Field attribute name.
    pub const fn attr(&self) -> &'static str {
        match self {
            Self::SoftDelete => "soft_delete",
            Self::CreatedBy => "created_by",
            Self::UpdatedBy => "updated_by",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at"
        }
    }

    /// Capability type exported by the runtime crate.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::SoftDelete => "DeleteFlag",
            Self::CreatedBy => "CreatedBy",
            Self::UpdatedBy => "UpdatedBy",
            Self::CreatedAt => "CreatedAt",
            Self::UpdatedAt => "UpdatedAt"
        }
    }

    fn from_attr(attr: &Attribute) -> Option<Self> {
        Self::ALL.into_iter().find(|b| attr.path().is_ident(b.attr()))
    }
}

/// Capability a field is marked with.
#[derive(Debug, Clone)]
pub enum CapabilityRef {
    /// One of the runtime crate's capabilities.
    Builtin(Builtin),
    /// User-defined capability type.
    Custom(Path)
}

impl CapabilityRef {
    /// Capability type path as it appears in generated code.
    pub fn to_type(&self, krate: &Path) -> TokenStream {
        match self {
            Self::Builtin(builtin) => {
                let ident = Ident::new(builtin.type_name(), proc_macro2::Span::call_site());
                quote! { #krate::#ident }
            }
            Self::Custom(path) => quote! { #path }
        }
    }

    /// Human-readable name, also used to detect duplicates.
    pub fn display(&self) -> String {
        match self {
            Self::Builtin(builtin) => builtin.type_name().to_string(),
            Self::Custom(path) => path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::")
        }
    }
}

/// A field exposed as a capability slot.
#[derive(Debug)]
pub struct SlotDef {
    /// Field identifier.
    pub ident: Ident,

    /// Capability stored in the field.
    pub capability: CapabilityRef
}

impl SlotDef {
    /// Parse a field, returning `None` for unmarked fields.
    ///
    /// # Errors
    ///
    /// - more than one marker on the field
    /// - marker with arguments (`#[created_by(...)]`)
    /// - marked field not declared as `Option<_>`
    pub fn from_field(field: &Field) -> darling::Result<Option<Self>> {
        let mut markers: Vec<(CapabilityRef, &Attribute)> = Vec::new();

        for attr in &field.attrs {
            if let Some(builtin) = Builtin::from_attr(attr) {
                attr.meta.require_path_only()?;
                markers.push((CapabilityRef::Builtin(builtin), attr));
            } else if attr.path().is_ident("capability") {
                let path: Path = attr.parse_args()?;
                markers.push((CapabilityRef::Custom(path), attr));
            }
        }

        let capability = match markers.len() {
            0 => return Ok(None),
            1 => markers.remove(0).0,
            _ => {
                return Err(darling::Error::custom(
                    "a field can carry only one capability marker"
                )
                .with_span(markers[1].1.path()));
            }
        };

        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("capability fields must be named").with_span(field)
        })?;

        if !is_option(&field.ty) {
            return Err(darling::Error::custom(format!(
                "capability field `{ident}` must be declared as `Option<_>`"
            ))
            .with_span(&field.ty));
        }

        Ok(Some(Self {
            ident,
            capability
        }))
    }
}

/// Check if `ty` is spelled `Option<T>` (any path prefix).
fn is_option(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    if type_path.qself.is_some() {
        return false;
    }
    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Option"
            && matches!(
                &segment.arguments,
                PathArguments::AngleBracketed(args) if args.args.len() == 1
            )
    })
}

/// Complete parsed entity definition.
#[derive(Debug)]
pub struct EntityDef {
    /// Struct identifier.
    pub ident: Ident,

    /// Struct generics, carried over to every generated impl.
    pub generics: Generics,

    /// Runtime crate path.
    pub krate: Path,

    /// Marked fields in declaration order.
    pub slots: Vec<SlotDef>
}

impl EntityDef {
    /// Parse entity definition from syn's `DeriveInput`.
    ///
    /// # Errors
    ///
    /// - Applied to enum, union, tuple or unit struct
    /// - Invalid field markers (see [`SlotDef::from_field`])
    /// - Same capability on two fields
    pub fn from_derive_input(input: &DeriveInput) -> darling::Result<Self> {
        let attrs = EntityAttrs::from_derive_input(input)?;

        let fields = match &input.data {
            syn::Data::Struct(data) => match &data.fields {
                syn::Fields::Named(named) => &named.named,
                _ => {
                    return Err(darling::Error::custom("Entity requires named fields")
                        .with_span(&input.ident));
                }
            },
            _ => {
                return Err(
                    darling::Error::custom("Entity can only be derived for structs")
                        .with_span(&input.ident)
                );
            }
        };

        let mut errors = darling::Error::accumulator();
        let mut slots: Vec<SlotDef> = Vec::new();

        for field in fields {
            let Some(slot) = errors.handle(SlotDef::from_field(field)).flatten() else {
                continue;
            };
            let name = slot.capability.display();
            if let Some(previous) = slots.iter().find(|s| s.capability.display() == name) {
                errors.push(
                    darling::Error::custom(format!(
                        "capability `{name}` is already declared on field `{}`",
                        previous.ident
                    ))
                    .with_span(&slot.ident)
                );
                continue;
            }
            slots.push(slot);
        }

        errors.finish()?;

        Ok(Self {
            ident: attrs.ident,
            generics: attrs.generics,
            krate: attrs.krate,
            slots
        })
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn parse(input: DeriveInput) -> darling::Result<EntityDef> {
        EntityDef::from_derive_input(&input)
    }

    #[test]
    fn collects_marked_fields_in_order() {
        let entity = parse(parse_quote! {
            struct Order {
                id: u64,
                #[created_by]
                creator: Option<String>,
                #[soft_delete]
                deleted: Option<i32>,
                #[capability(tenant::TenantId)]
                tenant: Option<String>
            }
        })
        .unwrap();

        let names: Vec<_> = entity.slots.iter().map(|s| s.ident.to_string()).collect();
        assert_eq!(names, ["creator", "deleted", "tenant"]);
        assert_eq!(entity.slots[2].capability.display(), "tenant::TenantId");
    }

    #[test]
    fn default_crate_path_is_prefill() {
        let entity = parse(parse_quote! {
            struct Tag {
                #[soft_delete]
                deleted: Option<i32>
            }
        })
        .unwrap();
        let krate = &entity.krate;
        assert_eq!(quote!(#krate).to_string(), quote!(::prefill).to_string());
    }

    #[test]
    fn custom_crate_path() {
        let entity = parse(parse_quote! {
            #[prefill(crate = "prefill_core")]
            struct Tag {
                #[soft_delete]
                deleted: Option<i32>
            }
        })
        .unwrap();
        assert!(entity.krate.is_ident("prefill_core"));
    }

    #[test]
    fn struct_without_markers_is_accepted() {
        let entity = parse(parse_quote! {
            struct Plain {
                name: String
            }
        })
        .unwrap();
        assert!(entity.slots.is_empty());
    }

    #[test]
    fn accepts_qualified_option() {
        let entity = parse(parse_quote! {
            struct Post {
                #[updated_by]
                editor: ::std::option::Option<String>
            }
        })
        .unwrap();
        assert_eq!(entity.slots.len(), 1);
    }

    #[test]
    fn rejects_non_option_field() {
        let err = parse(parse_quote! {
            struct Post {
                #[created_by]
                author: String
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("must be declared as `Option<_>`"));
    }

    #[test]
    fn rejects_two_markers_on_one_field() {
        let err = parse(parse_quote! {
            struct Post {
                #[created_by]
                #[updated_by]
                author: Option<String>
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only one capability marker"));
    }

    #[test]
    fn rejects_duplicate_capability() {
        let err = parse(parse_quote! {
            struct Post {
                #[created_by]
                author: Option<String>,
                #[created_by]
                owner: Option<String>
            }
        })
        .unwrap_err();
        assert!(
            err.to_string()
                .contains("capability `CreatedBy` is already declared on field `author`")
        );
    }

    #[test]
    fn rejects_marker_arguments() {
        let result = parse(parse_quote! {
            struct Post {
                #[soft_delete(true)]
                deleted: Option<i32>
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn rejects_tuple_struct() {
        let result = parse(parse_quote! {
            struct Post(Option<String>);
        });
        assert!(result.is_err());
    }

    #[test]
    fn rejects_enum() {
        let result = parse(parse_quote! {
            enum Post { A, B }
        });
        assert!(result.is_err());
    }

    #[test]
    fn builtin_names() {
        for builtin in Builtin::ALL {
            assert!(!builtin.attr().is_empty());
        }
        assert_eq!(Builtin::SoftDelete.type_name(), "DeleteFlag");
        assert_eq!(Builtin::UpdatedAt.attr(), "updated_at");
    }
}
