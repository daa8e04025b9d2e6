//! `#[overload]` attribute for free functions and single-method impl blocks.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ImplItem, ImplItemFn, Item, ItemFn, ItemImpl, ReturnType, Signature, Type,
    parse_macro_input,
};

/// Implementation of `#[overload]`.
pub fn overload_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            Span::call_site(),
            "#[overload] does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    let item = parse_macro_input!(item as Item);
    let expanded = match item {
        Item::Fn(func) => expand_fn(func),
        Item::Impl(block) => expand_impl(block),
        other => Err(syn::Error::new_spanned(
            other,
            "#[overload] can only be applied to functions or impl blocks",
        )),
    };

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Rejects the signature features a fn-pointer type cannot express.
fn check_signature(sig: &Signature) -> syn::Result<()> {
    if let Some(token) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            token,
            "#[overload] functions cannot be async",
        ));
    }
    if let Some(token) = &sig.unsafety {
        return Err(syn::Error::new_spanned(
            token,
            "#[overload] functions cannot be unsafe",
        ));
    }
    if let Some(token) = &sig.constness {
        return Err(syn::Error::new_spanned(
            token,
            "#[overload] functions cannot be const",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "#[overload] functions cannot be generic; every overload needs one concrete signature",
        ));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new_spanned(
            variadic,
            "#[overload] functions cannot be variadic",
        ));
    }
    let impl_trait = sig.inputs.iter().find_map(|input| match input {
        FnArg::Typed(pat) if matches!(*pat.ty, Type::ImplTrait(_)) => Some(&pat.ty),
        _ => None,
    });
    if let Some(ty) = impl_trait {
        return Err(syn::Error::new_spanned(
            ty,
            "#[overload] parameters cannot use `impl Trait`",
        ));
    }
    Ok(())
}

/// Parameter types, skipping any receiver.
fn param_types(sig: &Signature) -> Vec<&Type> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat) => Some(&*pat.ty),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

fn output_type(sig: &Signature) -> TokenStream2 {
    match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    }
}

fn pointer_type(sig: &Signature) -> TokenStream2 {
    let params = param_types(sig);
    let output = output_type(sig);
    quote! { fn(#(#params),*) -> #output }
}

fn arg_idents(count: usize) -> Vec<Ident> {
    (0..count).map(|i| format_ident!("__arg{}", i)).collect()
}

fn expand_fn(func: ItemFn) -> syn::Result<TokenStream2> {
    check_signature(&func.sig)?;
    if let Some(FnArg::Receiver(receiver)) = func.sig.inputs.first() {
        return Err(syn::Error::new_spanned(
            receiver,
            "#[overload] on a method needs the enclosing impl block to be annotated instead",
        ));
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;

    let name = &sig.ident;
    let inputs = &sig.inputs;
    let output = &sig.output;
    let (docs, attrs): (Vec<_>, Vec<_>) =
        attrs.into_iter().partition(|attr| attr.path().is_ident("doc"));
    let pointer = pointer_type(&sig);
    let params = param_types(&sig);
    let idents = arg_idents(params.len());

    Ok(quote! {
        #(#docs)*
        #[allow(non_camel_case_types)]
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #vis struct #name;

        impl #name {
            #(#attrs)*
            fn __overload_body(#inputs) #output #block

            /// Returns the plain function pointer.
            #[inline]
            #vis fn pointer(self) -> #pointer {
                Self::__overload_body
            }

            /// Calls the function directly.
            #[inline]
            #vis fn call(&self, #(#idents: #params),*) #output {
                Self::__overload_body(#(#idents),*)
            }
        }

        impl ::overload::Call<#pointer> for #name {
            #[inline]
            fn call_with<'a>(
                &self,
                args: <#pointer as ::overload::Signature>::Args<'a>,
            ) -> <#pointer as ::overload::Signature>::Output
            where
                #pointer: 'a,
            {
                <#pointer as ::overload::Call<#pointer>>::call_with(&self.pointer(), args)
            }
        }

        impl ::overload::Callable for #name {
            type Signature = #pointer;
        }

        impl ::overload::IntoStored for #name {
            type Stored = ::overload::Raw<#pointer>;

            fn into_stored(self) -> Self::Stored {
                ::overload::Raw::new(self.pointer())
            }
        }

        impl ::overload::Candidate for #name {
            type Signature = #pointer;

            fn identity(&self) -> Option<usize> {
                ::overload::Candidate::identity(&self.pointer())
            }
        }
    })
}

/// Finds the single `&self` method of an annotated impl block.
fn single_method(block: &ItemImpl) -> syn::Result<&ImplItemFn> {
    let mut methods = block.items.iter().filter_map(|item| match item {
        ImplItem::Fn(method) => Some(method),
        _ => None,
    });

    let method = methods.next().ok_or_else(|| {
        syn::Error::new_spanned(
            &block.self_ty,
            "#[overload] impl blocks need exactly one `&self` method",
        )
    })?;
    if let Some(extra) = methods.next() {
        return Err(syn::Error::new_spanned(
            &extra.sig.ident,
            "#[overload] impl blocks can declare only one method",
        ));
    }

    match method.sig.inputs.first() {
        Some(FnArg::Receiver(receiver))
            if receiver.reference.is_some() && receiver.mutability.is_none() =>
        {
            Ok(method)
        }
        _ => Err(syn::Error::new_spanned(
            &method.sig,
            "the #[overload] method must take `&self`",
        )),
    }
}

fn expand_impl(block: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &block.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[overload] applies to inherent impl blocks only",
        ));
    }

    let method = single_method(&block)?;
    check_signature(&method.sig)?;

    let self_ty = &block.self_ty;
    let (impl_generics, _, where_clause) = block.generics.split_for_impl();
    let method_name = &method.sig.ident;
    let pointer = pointer_type(&method.sig);
    let idents = arg_idents(param_types(&method.sig).len());

    Ok(quote! {
        #block

        impl #impl_generics ::overload::Call<#pointer> for #self_ty #where_clause {
            #[inline]
            fn call_with<'a>(
                &self,
                args: <#pointer as ::overload::Signature>::Args<'a>,
            ) -> <#pointer as ::overload::Signature>::Output
            where
                #pointer: 'a,
            {
                let (#(#idents,)*) = args;
                Self::#method_name(self, #(#idents),*)
            }
        }

        impl #impl_generics ::overload::Callable for #self_ty #where_clause {
            type Signature = #pointer;
        }

        impl #impl_generics ::overload::IntoStored for #self_ty #where_clause {
            type Stored = ::overload::ByMove<Self>;

            fn into_stored(self) -> Self::Stored {
                ::overload::ByMove::new(self)
            }
        }
    })
}
