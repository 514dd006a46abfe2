//! Derive macros for the tasklist reducer architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Classifies action enum variants as commands or events
//!
//! # Example
//!
//! ```ignore
//! use tasklist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[command]
//!     AddTodo { text: String },
//!
//!     #[event]
//!     TodoAdded { id: TodoId, text: String },
//! }
//!
//! assert!(TodoAction::AddTodo { text: "milk".into() }.is_command());
//! assert_eq!(TodoAction::AddTodo { text: "milk".into() }.name(), "AddTodo");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, parse_macro_input};

/// Role of a variant, taken from its marker attribute
#[derive(Clone, Copy, PartialEq, Eq)]
enum Role {
    Command,
    Event,
}

/// Derive macro for Action enums
///
/// Generates on the enum:
/// - `is_command()` - true for variants marked `#[command]`
/// - `is_event()` - true for variants marked `#[event]`
/// - `name()` - the variant name, for logging
///
/// # Attributes
///
/// Every variant carries exactly one of:
/// - `#[command]` - a request to change state
/// - `#[event]` - a fact that state changed
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]`
/// - A variant has neither
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_action(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    let mut command_arms = Vec::new();
    let mut event_arms = Vec::new();
    let mut name_arms = Vec::new();

    for variant in &data_enum.variants {
        let role = match (
            has_attribute(&variant.attrs, "command"),
            has_attribute(&variant.attrs, "event"),
        ) {
            (true, false) => Role::Command,
            (false, true) => Role::Event,
            (true, true) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Variant cannot be both #[command] and #[event]",
                ));
            },
            (false, false) => {
                return Err(syn::Error::new_spanned(
                    variant,
                    "Variant must be marked #[command] or #[event]",
                ));
            },
        };

        let pattern = variant_pattern(&variant.ident, &variant.fields);
        let label = variant.ident.to_string();

        match role {
            Role::Command => command_arms.push(quote! { #pattern => true, }),
            Role::Event => event_arms.push(quote! { #pattern => true, }),
        }
        name_arms.push(quote! { #pattern => #label, });
    }

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#event_arms)*
                    _ => false,
                }
            }

            /// Returns the variant name of this action
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }
        }
    })
}

/// Match pattern ignoring the variant's fields
fn variant_pattern(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
