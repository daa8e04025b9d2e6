//! Procedural macros for the overload dispatch registry.
//!
//! - `#[overload]` turns a free function, or an impl block with a single
//!   `&self` method, into a value that can be registered as an overload.
//! - `#[derive(Param)]` lets a user type appear in overload signatures.

use proc_macro::TokenStream;

mod overload;
mod param;
mod signatures;

/// Registers a function or functor as an overload.
///
/// # Free functions
///
/// The function is replaced by a zero-sized value of the same name. The value
/// stores as a plain function pointer, and `name.call(..)` still invokes it
/// directly.
///
/// ```rust,ignore
/// use overload::prelude::*;
///
/// #[overload]
/// fn area(side: &f64) -> f64 {
///     side * side
/// }
///
/// let shapes = make!(area, |w: f64, h: f64| w * h)?;
/// assert_eq!(call!(shapes, 3.0_f64), 9.0);
/// ```
///
/// # Functor impls
///
/// An inherent impl with exactly one `&self` method makes the type a functor
/// stored by move.
///
/// ```rust,ignore
/// struct Scale(i32);
///
/// #[overload]
/// impl Scale {
///     fn apply(&self, x: i32) -> i32 {
///         x * self.0
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn overload(attr: TokenStream, item: TokenStream) -> TokenStream {
    overload::overload_impl(attr, item)
}

/// Derives `Param` for a user type, making the type its own key.
#[proc_macro_derive(Param)]
pub fn derive_param(input: TokenStream) -> TokenStream {
    param::derive_param_impl(input)
}

/// Generates the fn-pointer signature impls. Internal to `overload-core`.
#[doc(hidden)]
#[proc_macro]
pub fn impl_signatures(input: TokenStream) -> TokenStream {
    signatures::impl_signatures_impl(input)
}
