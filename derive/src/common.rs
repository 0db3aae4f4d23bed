//! Attribute parsing shared by both derives

use darling::util::Override;
use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse_quote;

use crate::DeriveResult;

fn default_path() -> syn::Path {
    parse_quote!(__crate::export::Default::default)
}

/// Local used to hold the value of the `i`th field while loading
pub fn make_ident(i: usize) -> syn::Ident {
    syn::Ident::new(&format!("__field{}", i), Span::call_site())
}

pub fn make_index(i: usize) -> syn::Index {
    syn::Index::from(i)
}

pub fn compile_error<T: std::fmt::Display>(message: T) -> TokenStream {
    syn::Error::new(Span::call_site(), message).to_compile_error()
}

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(bsonarch))]
pub struct BsonarchOptions {
    pub ident: syn::Ident,
    /// Path to the bsonarch crate used by the generated code. Only needed
    /// when the derives are invoked through a re-export under another name.
    #[darling(default, rename = "crate")]
    pub crate_path: Option<syn::Path>,
}

impl BsonarchOptions {
    pub fn parse(input: &syn::DeriveInput) -> DeriveResult<Self> {
        BsonarchOptions::from_derive_input(input).map_err(|err| err.write_errors())
    }

    pub fn crate_path_or_default(&self) -> syn::Path {
        self.crate_path
            .clone()
            .unwrap_or_else(|| parse_quote!(bsonarch))
    }

    pub fn crate_use(&self) -> TokenStream {
        let path = self.crate_path_or_default();
        quote!(use #path as __crate;)
    }
}

#[derive(Default, FromField)]
#[darling(default, attributes(bsonarch))]
pub struct BsonarchFieldOptions {
    pub ident: Option<syn::Ident>,
    /// Key used instead of the field ident
    pub rename: Option<String>,
    /// Neither saved nor loaded, the field is filled with its default on load
    pub skip: bool,
    /// Use a default value when the key is missing.
    ///
    /// A function building the value can be given too:
    /// `#[bsonarch(default = "path::to::function")]`
    pub default: Option<Override<syn::Path>>,
}

impl BsonarchFieldOptions {
    pub fn parse(field: &syn::Field) -> DeriveResult<Self> {
        BsonarchFieldOptions::from_field(field).map_err(|err| err.write_errors())
    }

    /// Key of a named field
    pub fn name(&self) -> Option<String> {
        match (&self.rename, &self.ident) {
            (Some(rename), _) => Some(rename.clone()),
            (None, Some(ident)) => Some(ident.to_string()),
            (None, None) => None,
        }
    }

    pub fn default_behavior(&self) -> Option<syn::Path> {
        match &self.default {
            Some(Override::Explicit(path)) => Some(path.clone()),
            Some(Override::Inherit) => Some(default_path()),
            None => None,
        }
    }

    /// Like `default_behavior` but always has one, used for skipped fields
    pub fn default_behavior_forced(&self) -> syn::Path {
        self.default_behavior().unwrap_or_else(default_path)
    }
}

#[derive(FromVariant)]
#[darling(attributes(bsonarch))]
pub struct BsonarchVariantOptions {
    pub ident: syn::Ident,
    #[darling(default)]
    pub rename: Option<String>,
}

impl BsonarchVariantOptions {
    pub fn parse(variant: &syn::Variant) -> DeriveResult<Self> {
        BsonarchVariantOptions::from_variant(variant).map_err(|err| err.write_errors())
    }

    pub fn name(&self) -> String {
        match &self.rename {
            Some(rename) => rename.clone(),
            None => self.ident.to_string(),
        }
    }
}
