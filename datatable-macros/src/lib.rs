//! Procedural macros for datatable
//!
//! The generated code names `datatable_core` paths, so the deriving crate
//! must be able to resolve `datatable_core` (the core crate aliases itself
//! for its own use).

use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,

    /// Category reported by `ActionCategory::category`
    #[darling(default)]
    category: Option<String>,
}

/// Derive macro for the `Action` and `ActionCategory` traits
///
/// Generates a `name()` method that returns the variant name as a static
/// string, and a `category()` method that returns the variant's
/// `#[action(category = "...")]`, or `None` when the variant has none.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// enum PagerAction {
///     #[action(category = "page")]
///     PageNext,
///     #[action(category = "page")]
///     PageSelect(usize),
///     Refresh,
/// }
///
/// assert_eq!(PagerAction::PageSelect(2).name(), "PageSelect");
/// assert_eq!(PagerAction::PageNext.category(), Some("page"));
/// assert_eq!(PagerAction::Refresh.category(), None);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let name_arms = variants.iter().map(|v| {
        let variant = &v.ident;
        let variant_str = variant.to_string();
        quote! { #name::#variant { .. } => #variant_str }
    });

    let category_arms = variants.iter().map(|v| {
        let variant = &v.ident;
        let category = match &v.category {
            Some(c) => quote! { ::core::option::Option::Some(#c) },
            None => quote! { ::core::option::Option::None },
        };
        quote! { #name::#variant { .. } => #category }
    });

    let expanded = quote! {
        impl datatable_core::action::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }
        }

        impl datatable_core::action::ActionCategory for #name {
            fn category(&self) -> ::core::option::Option<&'static str> {
                match self {
                    #(#category_arms,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Container-level options for #[derive(FeatureFlags)]
#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named))]
struct FlagsOpts {
    ident: syn::Ident,
    data: darling::ast::Data<(), FlagField>,
}

/// Field-level attributes
#[derive(Debug, FromField)]
#[darling(attributes(flag))]
struct FlagField {
    ident: Option<syn::Ident>,
    ty: syn::Type,

    /// Initial state of the flag, spelled `#[flag(default = ...)]`
    #[darling(default, rename = "default")]
    initial: bool,
}

fn is_bool(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Path(p) if p.qself.is_none() && p.path.is_ident("bool"))
}

/// Derive macro for the `FeatureFlags` trait
///
/// Every field must be a `bool`; its name is the flag name. Also generates
/// a `Default` impl using each field's `#[flag(default = ...)]`, `false`
/// when absent.
///
/// # Example
/// ```ignore
/// #[derive(FeatureFlags)]
/// struct Features {
///     #[flag(default = true)]
///     search: bool,
///     compact_rows: bool,
/// }
///
/// let features = Features::default();
/// assert_eq!(features.is_enabled("search"), Some(true));
/// assert_eq!(Features::all_flags(), &["search", "compact_rows"]);
/// ```
#[proc_macro_derive(FeatureFlags, attributes(flag))]
pub fn derive_feature_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match FlagsOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let fields = match &opts.data {
        darling::ast::Data::Struct(fields) => &fields.fields,
        _ => {
            return syn::Error::new_spanned(&input, "FeatureFlags can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if let Some(field) = fields.iter().find(|f| !is_bool(&f.ty)) {
        return syn::Error::new_spanned(&field.ty, "feature flags must be `bool` fields")
            .to_compile_error()
            .into();
    }

    let idents: Vec<_> = fields.iter().filter_map(|f| f.ident.as_ref()).collect();
    let flag_names: Vec<_> = idents.iter().map(|i| i.to_string()).collect();
    let defaults: Vec<_> = fields.iter().map(|f| f.initial).collect();

    let expanded = quote! {
        impl datatable_core::features::FeatureFlags for #name {
            fn is_enabled(&self, name: &str) -> ::core::option::Option<bool> {
                match name {
                    #(#flag_names => ::core::option::Option::Some(self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set(&mut self, name: &str, enabled: bool) -> bool {
                match name {
                    #(#flag_names => {
                        self.#idents = enabled;
                        true
                    })*
                    _ => false,
                }
            }

            fn all_flags() -> &'static [&'static str] {
                &[#(#flag_names),*]
            }
        }

        impl ::core::default::Default for #name {
            fn default() -> Self {
                Self {
                    #(#idents: #defaults,)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
