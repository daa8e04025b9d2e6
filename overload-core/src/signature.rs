//! Signatures and the call contract.
//!
//! A signature is a fn-pointer type such as `fn(&i32) -> i32`. Its impls are
//! generated for every shape of up to four parameters passed by value, `&T`
//! or `&mut T`, and for up to eight by-value parameters.

/// A fn-pointer type describing one overload.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a supported overload signature",
    note = "signatures are fn-pointer types such as `fn(&i32) -> i32` with at most four parameters, or eight passed by value"
)]
pub trait Signature {
    /// Normalized key of the parameter list.
    type Key: 'static;
    /// Return type.
    type Output;
    /// Argument tuple the callable receives.
    type Args<'a>
    where
        Self: 'a;
    /// Number of parameters.
    const ARITY: usize;
}

/// Something that can be called with the arguments of signature `S`.
///
/// Every `Fn` whose parameters match `S` implements this trait, so closures and
/// functions satisfy it directly.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be called as `{S}`",
    label = "does not match the declared signature",
    note = "closures need explicit parameter types, e.g. `|x: &i32| x + 1`"
)]
pub trait Call<S: Signature> {
    /// Invokes the callable.
    fn call_with<'a>(&self, args: S::Args<'a>) -> S::Output
    where
        S: 'a;
}

/// A callable whose signature is known from its type.
///
/// Implementors also implement `Call<Self::Signature>`.
pub trait Callable {
    /// The one signature this callable answers to.
    type Signature: Signature;
}

/// A call-site argument tuple that can be forwarded to signature `S`.
#[diagnostic::on_unimplemented(
    message = "the arguments `{Self}` cannot be passed to `{S}`",
    note = "`&T` parameters accept `T`, `&T`, `&mut T` or an array for a slice; `&mut T` parameters need `&mut T`"
)]
pub trait Accept<S: Signature> {
    /// Forwards the arguments to `callee`.
    fn accept<C: Call<S> + ?Sized>(self, callee: &C) -> S::Output;
}

overload_macros::impl_signatures!(mixed = 4, values = 8);
