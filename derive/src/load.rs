use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Data, DataEnum, DataStruct, DeriveInput, Fields};

use crate::bound;
use crate::common::*;
use crate::DeriveResult;

pub fn derive(input: DeriveInput) -> DeriveResult<TokenStream> {
    match &input.data {
        Data::Struct(DataStruct { fields, .. }) => derive_struct(&input, fields),
        Data::Enum(enumeration) => derive_enum(&input, enumeration),
        Data::Union(_) => Err(compile_error("unions aren't supported")),
    }
}

fn derive_struct(input: &DeriveInput, fields: &Fields) -> DeriveResult<TokenStream> {
    let ident = &input.ident;

    // Every field is read into a local first so the node is finished before
    // the struct is built
    let mut read = vec![];
    let body = match fields {
        Fields::Named(fields) => {
            let mut field = vec![];
            let mut value = vec![];

            for (i, f) in fields.named.iter().enumerate() {
                let opt = BsonarchFieldOptions::parse(f)?;
                let local = make_ident(i);

                if opt.skip {
                    let default = opt.default_behavior_forced();
                    read.push(quote!(let #local = #default();));
                } else {
                    let name = opt.name().ok_or_else(|| compile_error("named field without ident"))?;
                    read.push(match opt.default_behavior() {
                        Some(default) => quote!(let #local = __ar.nvp_or_else(#name, #default)?;),
                        None => quote!(let #local = __ar.nvp(#name)?;),
                    });
                }

                field.push(f.ident.clone());
                value.push(local);
            }

            quote!(#ident { #(#field: #value,)* })
        }
        Fields::Unnamed(fields) => {
            let mut value = vec![];

            for (i, f) in fields.unnamed.iter().enumerate() {
                let opt = BsonarchFieldOptions::parse(f)?;
                let local = make_ident(i);

                // Unnamed fields are read in order, a missing one is an error
                if opt.skip {
                    let default = opt.default_behavior_forced();
                    read.push(quote!(let #local = #default();));
                } else {
                    read.push(quote!(let #local = __ar.load()?;));
                }
                value.push(local);
            }

            quote!(#ident(#(#value,)*))
        }
        Fields::Unit => quote!(#ident),
    };

    let opt = BsonarchOptions::parse(input)?;
    let crate_use = opt.crate_use();

    let bound = parse_quote!(__crate::de::Load);
    let where_clause = bound::where_clause_with_bound(&input.generics, bound);

    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            #crate_use

            impl #impl_generics __crate::de::Load for #ident #ty_generics #where_clause {
                fn load(__ar: &mut dyn __crate::de::InputArchive) -> __crate::Result<Self> {
                    __ar.start_node()?;
                    #(#read)*
                    __ar.finish_node()?;
                    __crate::export::Ok(#body)
                }
            }
        };
    })
}

fn derive_enum(input: &DeriveInput, enumeration: &DataEnum) -> DeriveResult<TokenStream> {
    if input.generics.lt_token.is_some() || input.generics.where_clause.is_some() {
        return Err(compile_error("enums with generics are not supported"));
    }

    let mut variant = vec![];
    let mut name = vec![];
    for v in &enumeration.variants {
        if !matches!(v.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                v,
                "only unit variants are supported, they are loaded by name",
            )
            .to_compile_error());
        }
        let opt = BsonarchVariantOptions::parse(v)?;
        name.push(opt.name());
        variant.push(opt.ident);
    }

    let opt = BsonarchOptions::parse(input)?;
    let crate_use = opt.crate_use();
    let ident = &input.ident;

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            #crate_use

            impl __crate::de::Load for #ident {
                fn load(__ar: &mut dyn __crate::de::InputArchive) -> __crate::Result<Self> {
                    let __name = __ar.string()?;
                    match &*__name {
                        #(#name => __crate::export::Ok(#ident::#variant),)*
                        __other => __crate::export::Err(
                            __crate::Error::UnknownVariant(__crate::export::ToOwned::to_owned(__other)),
                        ),
                    }
                }
            }
        };
    })
}
