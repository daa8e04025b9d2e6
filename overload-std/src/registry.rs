//! The overload registry.
//!
//! [`Overloaded`] owns a validated dispatch table and presents every entry as
//! one callable surface. Invocation is resolved at compile time from the
//! argument types; there is no lookup at runtime.
//!
//! # Example
//!
//! ```rust,ignore
//! fn describe_int(x: &i32) -> String { format!("int {x}") }
//! fn describe_pair(a: u8, b: u8) -> String { format!("pair {a} {b}") }
//!
//! let overloads = Overloaded::builder()
//!     .with(describe_int as fn(&i32) -> String)
//!     .with(describe_pair as fn(u8, u8) -> String)
//!     .build()?;
//!
//! assert_eq!(overloads.invoke((7_i32,)), "int 7");
//! assert_eq!(overloads.invoke((1_u8, 2_u8)), "pair 1 2");
//! ```

use std::{any::TypeId, fmt};

use overload_core::{Accept, Arguments, BuildResult, Candidate, IntoStored, Signature};

use crate::{
    table::{Append, EntryInfo, EntryOf, HNil, KeyOf, Pluck, Select, Table},
    validate::validate,
};

/// Signature selected by argument tuple `A` in table `T`.
type Selected<T, A, I> = <T as Select<<A as Arguments>::Key, I>>::Signature;

/// A fixed set of overloads, each with a distinct parameter key.
///
/// The table type lists the entries; name it with `Overloads![..]` when a
/// registry has to be stored in a struct.
#[derive(Clone, Copy)]
pub struct Overloaded<T> {
    table: T,
}

impl Overloaded<HNil> {
    /// Starts an incremental builder.
    pub fn builder() -> Builder<HNil> {
        Builder::new()
    }
}

impl<T: Table> Overloaded<T> {
    /// Number of entries, known at compile time.
    pub const SIZE: usize = T::LEN;

    /// Wraps a table after checking that its keys are unique.
    pub fn new(table: T) -> BuildResult<Self> {
        validate::<T>()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(entries = T::LEN, "overload registry constructed");

        Ok(Self { table })
    }

    /// Number of entries.
    pub const fn size(&self) -> usize {
        T::LEN
    }

    /// Whether some entry has the key of signature `S`.
    ///
    /// Only the normalized key is compared, so `exists::<fn(i32)>()` is also
    /// true for a registered `fn(&i32) -> bool`.
    pub fn exists<S: Signature>(&self) -> bool {
        T::contains_key(TypeId::of::<KeyOf<S>>())
    }

    /// Whether `candidate` itself is registered.
    ///
    /// Compares addresses: a function pointer matches the stored pointer, a
    /// borrowed functor matches its own reference. Owned and erased entries
    /// never match.
    pub fn exists_value<C: Candidate + ?Sized>(&self, candidate: &C) -> bool {
        match candidate.identity() {
            Some(identity) => self
                .table
                .matches(TypeId::of::<KeyOf<C::Signature>>(), identity),
            None => false,
        }
    }

    /// Describes every entry in table order.
    pub fn describe(&self) -> Vec<EntryInfo> {
        let mut out = Vec::with_capacity(T::LEN);
        T::describe(&mut out);
        out
    }
}

impl<T> Overloaded<T> {
    /// Calls the overload whose key matches the argument types.
    ///
    /// Fails to compile when no entry matches or the arguments cannot be
    /// passed to the selected signature.
    #[inline]
    pub fn invoke<A, I>(&self, args: A) -> <Selected<T, A, I> as Signature>::Output
    where
        A: Arguments + Accept<Selected<T, A, I>>,
        T: Select<A::Key, I>,
    {
        args.accept(self.table.select())
    }

    /// Removes the entry with the key of `candidate`'s signature.
    pub fn erase<C, I>(
        self,
        _candidate: &C,
    ) -> Overloaded<<T as Pluck<KeyOf<C::Signature>, I>>::Remainder>
    where
        C: Candidate + ?Sized,
        T: Pluck<KeyOf<C::Signature>, I>,
    {
        self.erase_signature::<C::Signature, I>()
    }

    /// Removes the entry with the key of signature `S`.
    pub fn erase_signature<S, I>(self) -> Overloaded<<T as Pluck<KeyOf<S>, I>>::Remainder>
    where
        S: Signature,
        T: Pluck<KeyOf<S>, I>,
    {
        let (_removed, table) = self.table.pluck();

        #[cfg(feature = "tracing")]
        tracing::trace!(key = std::any::type_name::<KeyOf<S>>(), "overload erased");

        Overloaded { table }
    }

    /// Adds an entry, rejecting it if its key is already present.
    pub fn insert<C>(self, callable: C) -> BuildResult<Overloaded<T::Output>>
    where
        C: IntoStored,
        T: Append<EntryOf<C>>,
        T::Output: Table,
    {
        let table = self.table.append(crate::table::entry(callable));
        validate::<T::Output>()?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            key = std::any::type_name::<KeyOf<<C::Stored as overload_core::Stored>::Signature>>(),
            entries = <T::Output as Table>::LEN,
            "overload inserted"
        );

        Ok(Overloaded { table })
    }

    /// Borrows the table.
    pub fn table(&self) -> &T {
        &self.table
    }

    /// Unwraps the table.
    pub fn into_table(self) -> T {
        self.table
    }
}

impl<T: Table> fmt::Debug for Overloaded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overloaded")
            .field("size", &T::LEN)
            .field("entries", &self.describe())
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder adding one overload at a time.
///
/// Keys are checked once, in [`Builder::build`].
pub struct Builder<T> {
    table: T,
}

impl Builder<HNil> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self { table: HNil }
    }
}

impl Default for Builder<HNil> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Builder<T> {
    /// Appends an overload.
    pub fn with<C>(self, callable: C) -> Builder<T::Output>
    where
        C: IntoStored,
        T: Append<EntryOf<C>>,
    {
        Builder {
            table: self.table.append(crate::table::entry(callable)),
        }
    }

    /// Finishes the registry.
    pub fn build(self) -> BuildResult<Overloaded<T>>
    where
        T: Table,
    {
        Overloaded::new(self.table)
    }
}
