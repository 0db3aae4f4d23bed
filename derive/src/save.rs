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
    let body = match fields {
        Fields::Named(fields) => {
            let mut field = vec![];
            let mut name = vec![];

            for f in &fields.named {
                let opt = BsonarchFieldOptions::parse(f)?;
                if opt.skip {
                    continue;
                }
                name.push(opt.name().ok_or_else(|| compile_error("named field without ident"))?);
                field.push(f.ident.clone());
            }

            quote! {
                __ar.start_node()?;
                #(__ar.nvp(#name, &self.#field)?;)*
                __ar.finish_node()
            }
        }
        Fields::Unnamed(fields) => {
            let mut index = vec![];
            for (i, f) in fields.unnamed.iter().enumerate() {
                if !BsonarchFieldOptions::parse(f)?.skip {
                    index.push(make_index(i));
                }
            }

            quote! {
                __ar.start_node()?;
                #(__ar.save(&self.#index)?;)*
                __ar.finish_node()
            }
        }
        Fields::Unit => quote! {
            __ar.start_node()?;
            __ar.finish_node()
        },
    };

    let opt = BsonarchOptions::parse(input)?;
    let crate_use = opt.crate_use();

    let bound = parse_quote!(__crate::ser::Save);
    let where_clause = bound::where_clause_with_bound(&input.generics, bound);

    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();

    Ok(quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            #crate_use

            impl #impl_generics __crate::ser::Save for #ident #ty_generics #where_clause {
                fn save(&self, __ar: &mut dyn __crate::ser::OutputArchive) -> __crate::Result<()> {
                    #body
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
                "only unit variants are supported, they are saved by name",
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

            impl __crate::ser::Save for #ident {
                fn save(&self, __ar: &mut dyn __crate::ser::OutputArchive) -> __crate::Result<()> {
                    let __name = match *self {
                        #(#ident::#variant => #name,)*
                    };
                    __ar.string(__name)
                }
            }
        };
    })
}
