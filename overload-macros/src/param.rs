//! `#[derive(Param)]`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

/// Implementation of `#[derive(Param)]`.
///
/// A derived type is its own key. Generic types get one key per
/// instantiation, which requires every instantiation to be `'static`.
pub fn derive_param_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let mut predicates = where_clause
        .map(|clause| clause.predicates.iter().cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    predicates.push(syn::parse_quote!(Self: 'static));

    let expanded = quote! {
        impl #impl_generics ::overload::Param for #name #ty_generics
        where
            #(#predicates,)*
        {
            type Key = Self;
        }
    };

    TokenStream::from(expanded)
}
