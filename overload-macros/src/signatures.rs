//! Generator for the fn-pointer signature impls of `overload-core`.
//!
//! A fn-pointer type such as `fn(&T0, T1) -> R` is a distinct type for every
//! combination of by-value, `&` and `&mut` parameters, so each shape needs its
//! own impls. This module expands `impl_signatures!(mixed = 4, values = 8)`
//! into every shape up to `mixed` parameters with all passing modes, and up to
//! `values` parameters passed by value.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Ident, LitInt, Token, parse::Parse, parse_macro_input};

/// Arguments for `impl_signatures!`.
pub(crate) struct SignatureArgs {
    mixed: usize,
    values: usize,
}

impl Parse for SignatureArgs {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut mixed = 0;
        let mut values = 0;

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let lit: LitInt = input.parse()?;

            match ident.to_string().as_str() {
                "mixed" => mixed = lit.base10_parse()?,
                "values" => values = lit.base10_parse()?,
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(SignatureArgs { mixed, values })
    }
}

/// How a declared parameter receives its argument.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Passing {
    Value,
    Shared,
    Exclusive,
}

const ALL: [Passing; 3] = [Passing::Value, Passing::Shared, Passing::Exclusive];

/// One generated parameter position.
struct Slot {
    passing: Passing,
    param: Ident,
    arg: Ident,
    bound: Ident,
    local: Ident,
}

impl Slot {
    fn new(index: usize, passing: Passing) -> Self {
        let ident = |prefix: &str| Ident::new(&format!("{prefix}{index}"), Span::call_site());
        Self {
            passing,
            param: ident("T"),
            arg: ident("X"),
            bound: ident("a"),
            local: ident("x"),
        }
    }

    /// The parameter as written in the fn-pointer type.
    fn declared(&self) -> TokenStream2 {
        let t = &self.param;
        match self.passing {
            Passing::Value => quote! { #t },
            Passing::Shared => quote! { &#t },
            Passing::Exclusive => quote! { &mut #t },
        }
    }

    /// The parameter with the borrow lifetime spelled out.
    fn received(&self) -> TokenStream2 {
        let t = &self.param;
        match self.passing {
            Passing::Value => quote! { #t },
            Passing::Shared => quote! { &'a #t },
            Passing::Exclusive => quote! { &'a mut #t },
        }
    }

    fn param_bound(&self) -> TokenStream2 {
        let t = &self.param;
        match self.passing {
            Passing::Value => quote! { #t: crate::Param },
            _ => quote! { #t: ?Sized + crate::Param },
        }
    }

    fn forward_bound(&self) -> TokenStream2 {
        let (t, x) = (&self.param, &self.arg);
        match self.passing {
            Passing::Value => quote! { #x: crate::IntoParam<#t> },
            Passing::Shared => quote! { #x: crate::AsParamRef<#t> },
            Passing::Exclusive => quote! { #x: crate::AsParamMut<#t> },
        }
    }

    fn binding(&self) -> TokenStream2 {
        let x = &self.local;
        match self.passing {
            Passing::Exclusive => quote! { mut #x },
            _ => quote! { #x },
        }
    }

    fn forward(&self) -> TokenStream2 {
        let (t, x) = (&self.param, &self.local);
        match self.passing {
            Passing::Value => quote! { crate::IntoParam::<#t>::into_param(#x) },
            Passing::Shared => quote! { crate::AsParamRef::<#t>::as_param_ref(&#x) },
            Passing::Exclusive => quote! { crate::AsParamMut::<#t>::as_param_mut(&mut #x) },
        }
    }
}

fn shape(slots: &[Slot]) -> TokenStream2 {
    let arity = slots.len();
    let declared: Vec<_> = slots.iter().map(Slot::declared).collect();
    let received: Vec<_> = slots.iter().map(Slot::received).collect();
    let params: Vec<_> = slots.iter().map(|s| &s.param).collect();
    let param_bounds: Vec<_> = slots.iter().map(Slot::param_bound).collect();
    let args: Vec<_> = slots.iter().map(|s| &s.arg).collect();
    let forward_bounds: Vec<_> = slots.iter().map(Slot::forward_bound).collect();
    let bound: Vec<_> = slots.iter().map(|s| &s.bound).collect();
    let bindings: Vec<_> = slots.iter().map(Slot::binding).collect();
    let forwards: Vec<_> = slots.iter().map(Slot::forward).collect();

    let sig = quote! { fn(#(#declared),*) -> R };
    let key = if arity == 0 {
        quote! { crate::Void }
    } else {
        quote! { (#(<#params as crate::Param>::Key,)*) }
    };

    quote! {
        impl<R, #(#param_bounds),*> crate::Signature for #sig {
            type Key = #key;
            type Output = R;
            type Args<'a> = (#(#received,)*) where Self: 'a;
            const ARITY: usize = #arity;
        }

        impl<F, R, #(#param_bounds),*> crate::Call<#sig> for F
        where
            F: Fn(#(#declared),*) -> R,
        {
            #[inline]
            fn call_with<'a>(&self, args: (#(#received,)*)) -> R
            where
                #sig: 'a,
            {
                let (#(#bound,)*) = args;
                (self)(#(#bound),*)
            }
        }

        impl<R, #(#param_bounds,)* #(#args),*> crate::Accept<#sig> for (#(#args,)*)
        where
            #(#forward_bounds,)*
        {
            #[inline]
            fn accept<C: crate::Call<#sig> + ?Sized>(self, callee: &C) -> R {
                let (#(#bindings,)*) = self;
                callee.call_with((#(#forwards,)*))
            }
        }

        impl<R, #(#param_bounds),*> crate::Callable for #sig {
            type Signature = Self;
        }

        impl<R, #(#param_bounds),*> crate::IntoStored for #sig {
            type Stored = crate::Raw<Self>;

            fn into_stored(self) -> Self::Stored {
                crate::Raw::new(self)
            }
        }

        impl<R, #(#param_bounds),*> crate::Candidate for #sig {
            type Signature = Self;

            fn identity(&self) -> Option<usize> {
                Some(*self as usize)
            }
        }
    }
}

/// Every passing-mode combination of `arity` parameters.
fn combinations(arity: usize, modes: &[Passing]) -> Vec<Vec<Passing>> {
    let mut out = vec![Vec::new()];
    for _ in 0..arity {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                modes.iter().map(move |mode| {
                    let mut next = prefix.clone();
                    next.push(*mode);
                    next
                })
            })
            .collect();
    }
    out
}

/// Implementation of `impl_signatures!`.
pub fn impl_signatures_impl(input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as SignatureArgs);

    let mut expanded = TokenStream2::new();
    for arity in 0..=args.mixed.max(args.values) {
        let modes: &[Passing] = if arity <= args.mixed {
            &ALL
        } else {
            &[Passing::Value]
        };
        for combo in combinations(arity, modes) {
            let slots: Vec<_> = combo
                .into_iter()
                .enumerate()
                .map(|(i, passing)| Slot::new(i, passing))
                .collect();
            expanded.extend(shape(&slots));
        }
    }

    TokenStream::from(expanded)
}
