//! How registered callables are held.
//!
//! [`IntoStored`] picks a wrapper at registration:
//!
//! - fn pointers and `#[overload]` functions become [`Raw`]
//! - a reference to a callable object becomes [`ByRef`]
//! - an owned callable object is moved into [`ByMove`]
//! - closures wrapped with [`Erased::new`] or [`SyncErased::new`] stay boxed
//!   behind `dyn Call`
//!
//! Nothing is ever cloned. A move-only functor is accepted as long as it is
//! moved in, and a borrowed functor must outlive the registry that holds it.

use std::fmt;

use crate::{Call, Callable, Signature};

/// Which wrapper an entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// A plain function pointer.
    Pointer,
    /// A borrowed callable object.
    Borrowed,
    /// A callable object owned by the registry.
    Owned,
    /// A boxed, type-erased callable.
    Erased,
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StorageKind::Pointer => "pointer",
            StorageKind::Borrowed => "borrowed",
            StorageKind::Owned => "owned",
            StorageKind::Erased => "erased",
        };
        f.write_str(name)
    }
}

/// A callable as held by a registry entry.
///
/// Implementors also implement `Call<Self::Signature>`.
pub trait Stored {
    /// The signature the entry answers to.
    type Signature: Signature;
    /// The wrapper category.
    const KIND: StorageKind;

    /// Address used by identity queries, if the wrapper has a stable one.
    fn identity(&self) -> Option<usize> {
        None
    }
}

/// Conversion of a registrable value into its stored form.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be registered as an overload",
    label = "not a registrable callable",
    note = "register fn pointers, `#[overload]` items, `&functor`, or closures wrapped in `Erased::<fn(..)>::new`"
)]
pub trait IntoStored {
    /// The wrapper this value is stored in.
    type Stored: Stored;

    /// Wraps the value.
    fn into_stored(self) -> Self::Stored;
}

/// A value that can be looked up by identity.
pub trait Candidate {
    /// The signature the candidate would be registered under.
    type Signature: Signature;

    /// The candidate's address, or `None` when it has no stable identity.
    fn identity(&self) -> Option<usize>;
}

// ============================================================================
// Raw
// ============================================================================

/// A function pointer stored verbatim.
#[derive(Clone, Copy)]
pub struct Raw<S>(S);

impl<S> Raw<S> {
    /// Wraps a function pointer.
    pub fn new(pointer: S) -> Self {
        Raw(pointer)
    }

    /// The stored pointer.
    pub fn get(&self) -> &S {
        &self.0
    }
}

impl<S> fmt::Debug for Raw<S>
where
    S: Candidate,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.identity() {
            Some(addr) => write!(f, "Raw({:#x})", addr),
            None => f.write_str("Raw"),
        }
    }
}

impl<S> Call<S> for Raw<S>
where
    S: Signature + Call<S>,
{
    #[inline]
    fn call_with<'a>(&self, args: S::Args<'a>) -> S::Output
    where
        S: 'a,
    {
        self.0.call_with(args)
    }
}

impl<S> Stored for Raw<S>
where
    S: Signature + Candidate + Call<S>,
{
    type Signature = S;
    const KIND: StorageKind = StorageKind::Pointer;

    fn identity(&self) -> Option<usize> {
        self.0.identity()
    }
}

impl<S: Signature> Callable for Raw<S> {
    type Signature = S;
}

impl<S> IntoStored for Raw<S>
where
    S: Signature + Candidate + Call<S>,
{
    type Stored = Self;

    fn into_stored(self) -> Self {
        self
    }
}

impl<S> Candidate for Raw<S>
where
    S: Signature + Candidate,
{
    type Signature = S;

    fn identity(&self) -> Option<usize> {
        self.0.identity()
    }
}

// ============================================================================
// ByRef
// ============================================================================

/// A borrowed callable object.
pub struct ByRef<'r, C: ?Sized>(&'r C);

impl<'r, C: ?Sized> ByRef<'r, C> {
    /// Borrows a callable object.
    pub fn new(callable: &'r C) -> Self {
        ByRef(callable)
    }

    /// The borrowed object.
    pub fn get(&self) -> &'r C {
        self.0
    }

    fn address(&self) -> usize {
        self.0 as *const C as *const () as usize
    }
}

impl<C: ?Sized> Clone for ByRef<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for ByRef<'_, C> {}

impl<C: ?Sized> fmt::Debug for ByRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByRef({:#x})", self.address())
    }
}

impl<C> Call<C::Signature> for ByRef<'_, C>
where
    C: Callable + Call<C::Signature> + ?Sized,
{
    #[inline]
    fn call_with<'a>(
        &self,
        args: <C::Signature as Signature>::Args<'a>,
    ) -> <C::Signature as Signature>::Output
    where
        C::Signature: 'a,
    {
        self.0.call_with(args)
    }
}

impl<C> Stored for ByRef<'_, C>
where
    C: Callable + Call<C::Signature> + ?Sized,
{
    type Signature = C::Signature;
    const KIND: StorageKind = StorageKind::Borrowed;

    fn identity(&self) -> Option<usize> {
        Some(self.address())
    }
}

impl<C> Callable for ByRef<'_, C>
where
    C: Callable + ?Sized,
{
    type Signature = C::Signature;
}

impl<C> IntoStored for ByRef<'_, C>
where
    C: Callable + Call<C::Signature> + ?Sized,
{
    type Stored = Self;

    fn into_stored(self) -> Self {
        self
    }
}

impl<C> Candidate for ByRef<'_, C>
where
    C: Callable + ?Sized,
{
    type Signature = C::Signature;

    fn identity(&self) -> Option<usize> {
        Some(self.address())
    }
}

impl<'r, C> IntoStored for &'r C
where
    C: Callable + Call<C::Signature> + ?Sized,
{
    type Stored = ByRef<'r, C>;

    fn into_stored(self) -> ByRef<'r, C> {
        ByRef::new(self)
    }
}

impl<C> Candidate for &C
where
    C: Callable + ?Sized,
{
    type Signature = C::Signature;

    fn identity(&self) -> Option<usize> {
        Some(*self as *const C as *const () as usize)
    }
}

// ============================================================================
// ByMove
// ============================================================================

/// A callable object owned by the registry.
#[derive(Debug, Clone, Default)]
pub struct ByMove<C>(C);

impl<C> ByMove<C> {
    /// Takes ownership of a callable object.
    pub fn new(callable: C) -> Self {
        ByMove(callable)
    }

    /// The owned object.
    pub fn get(&self) -> &C {
        &self.0
    }

    /// Gives the object back.
    pub fn into_inner(self) -> C {
        self.0
    }
}

impl<C> Call<C::Signature> for ByMove<C>
where
    C: Callable + Call<C::Signature>,
{
    #[inline]
    fn call_with<'a>(
        &self,
        args: <C::Signature as Signature>::Args<'a>,
    ) -> <C::Signature as Signature>::Output
    where
        C::Signature: 'a,
    {
        self.0.call_with(args)
    }
}

impl<C> Stored for ByMove<C>
where
    C: Callable + Call<C::Signature>,
{
    type Signature = C::Signature;
    const KIND: StorageKind = StorageKind::Owned;
}

impl<C: Callable> Callable for ByMove<C> {
    type Signature = C::Signature;
}

impl<C> IntoStored for ByMove<C>
where
    C: Callable + Call<C::Signature>,
{
    type Stored = Self;

    fn into_stored(self) -> Self {
        self
    }
}

impl<C: Callable> Candidate for ByMove<C> {
    type Signature = C::Signature;

    fn identity(&self) -> Option<usize> {
        None
    }
}

// ============================================================================
// Erased
// ============================================================================

macro_rules! erased_storage {
    ($(#[$meta:meta])* $name:ident, $($bound:tt)*) => {
        $(#[$meta])*
        pub struct $name<'f, S: Signature>(Box<dyn Call<S> $($bound)* + 'f>);

        impl<'f, S: Signature> $name<'f, S> {
            /// Boxes a callable that satisfies `S`.
            pub fn new<F>(callable: F) -> Self
            where
                F: Call<S> $($bound)* + 'f,
            {
                $name(Box::new(callable))
            }
        }

        impl<S: Signature> fmt::Debug for $name<'_, S> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }

        impl<S: Signature> Call<S> for $name<'_, S> {
            #[inline]
            fn call_with<'a>(&self, args: S::Args<'a>) -> S::Output
            where
                S: 'a,
            {
                self.0.call_with(args)
            }
        }

        impl<S: Signature> Stored for $name<'_, S> {
            type Signature = S;
            const KIND: StorageKind = StorageKind::Erased;
        }

        impl<S: Signature> Callable for $name<'_, S> {
            type Signature = S;
        }

        impl<S: Signature> IntoStored for $name<'_, S> {
            type Stored = Self;

            fn into_stored(self) -> Self {
                self
            }
        }

        impl<S: Signature> Candidate for $name<'_, S> {
            type Signature = S;

            fn identity(&self) -> Option<usize> {
                None
            }
        }
    };
}

erased_storage!(
    /// A boxed callable bound to signature `S`.
    ///
    /// The closure may hold non-thread-safe state such as `Cell` or `Rc`; a
    /// registry holding it is then confined to one thread. Use [`SyncErased`]
    /// to share the registry.
    ///
    /// ```rust,ignore
    /// let offset = 3;
    /// let add = Erased::<fn(i32) -> i32>::new(move |x: i32| x + offset);
    /// ```
    Erased,
);

erased_storage!(
    /// A boxed `Send + Sync` callable bound to signature `S`.
    SyncErased, + Send + Sync
);
