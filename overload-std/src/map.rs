//! Free functions over bare dispatch tables.
//!
//! These mirror the [`Overloaded`] methods for code that keeps the table
//! itself rather than a registry. Every function that produces a table
//! returns a new value; nothing is modified in place.

use std::any::TypeId;

use overload_core::{Accept, Arguments, BuildResult, Candidate, IntoStored, Signature};

use crate::{
    registry::Overloaded,
    table::{Append, EntryOf, KeyOf, Pluck, Select, Table, entry},
    validate::validate,
};

/// Checks a table and returns it unchanged.
pub fn create<T: Table>(table: T) -> BuildResult<T> {
    validate::<T>()?;
    Ok(table)
}

/// Checks a table and wraps it in a registry.
pub fn make_overloaded_function<T: Table>(table: T) -> BuildResult<Overloaded<T>> {
    Overloaded::new(table)
}

/// Number of entries in the table.
pub const fn calls<T: Table>(_table: &T) -> usize {
    T::LEN
}

/// Whether the table has an entry with the key of signature `S`.
pub fn exists<S: Signature, T: Table>(_table: &T) -> bool {
    T::contains_key(TypeId::of::<KeyOf<S>>())
}

/// Whether `candidate` itself is one of the table's entries.
pub fn exists_value<T, C>(table: &T, candidate: &C) -> bool
where
    T: Table,
    C: Candidate + ?Sized,
{
    candidate
        .identity()
        .is_some_and(|identity| table.matches(TypeId::of::<KeyOf<C::Signature>>(), identity))
}

/// Removes the entry with the key of `candidate`'s signature.
pub fn erase<T, C, I>(table: T, _candidate: &C) -> T::Remainder
where
    C: Candidate + ?Sized,
    T: Pluck<KeyOf<C::Signature>, I>,
{
    let (_removed, rest) = table.pluck();
    rest
}

/// Appends an entry, rejecting it if its key is already present.
pub fn insert<T, C>(table: T, callable: C) -> BuildResult<T::Output>
where
    C: IntoStored,
    T: Append<EntryOf<C>>,
    T::Output: Table,
{
    validate::<T::Output>()?;
    Ok(table.append(entry(callable)))
}

/// Calls the entry whose key matches the argument types.
pub fn invoke<T, A, I>(
    table: &T,
    args: A,
) -> <<T as Select<A::Key, I>>::Signature as Signature>::Output
where
    A: Arguments + Accept<<T as Select<A::Key, I>>::Signature>,
    T: Select<A::Key, I>,
{
    args.accept(table.select())
}
