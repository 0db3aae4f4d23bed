#![recursion_limit = "128"]

extern crate proc_macro;

mod bound;
mod common;
mod load;
mod save;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

type DeriveResult<T> = std::result::Result<T, proc_macro2::TokenStream>;

#[proc_macro_derive(Save, attributes(bsonarch))]
pub fn derive_save(input: TokenStream) -> TokenStream {
    save::derive(parse_macro_input!(input as DeriveInput))
        .unwrap_or_else(|err| err)
        .into()
}

#[proc_macro_derive(Load, attributes(bsonarch))]
pub fn derive_load(input: TokenStream) -> TokenStream {
    load::derive(parse_macro_input!(input as DeriveInput))
        .unwrap_or_else(|err| err)
        .into()
}
