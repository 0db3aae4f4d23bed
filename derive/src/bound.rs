use syn::{parse_quote, GenericParam, Generics, WhereClause};

/// Where clause of `generics` plus `T: bound` for every type parameter `T`.
pub fn where_clause_with_bound(generics: &Generics, bound: syn::Path) -> WhereClause {
    let mut clause = generics
        .where_clause
        .clone()
        .unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

    for param in &generics.params {
        if let GenericParam::Type(param) = param {
            let ident = &param.ident;
            clause.predicates.push(parse_quote!(#ident: #bound));
        }
    }

    clause
}
