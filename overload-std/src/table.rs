//! HList dispatch table.
//!
//! A table is a heterogeneous list of [`Entry`] values, one per overload. Each
//! entry carries its parameter key as a type, so lookups are resolved by the
//! compiler: [`Select`] finds the entry for a key, [`Pluck`] removes it, and
//! [`Append`] adds a new one at the end. The position index (`Here` or
//! `There<I>`) is always inferred.

use std::{any::TypeId, fmt, marker::PhantomData};

use overload_core::{Call, IntoStored, ParamKey, Raw, Signature, StorageKind, Stored};

/// HList terminator - an empty table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HNil;

/// HList cons cell - an entry followed by the rest of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HCons<H, T> {
    /// The first entry.
    pub head: H,
    /// The remaining entries.
    pub tail: T,
}

impl<H, T> HCons<H, T> {
    /// Prepends `head` to `tail`.
    pub fn new(head: H, tail: T) -> Self {
        Self { head, tail }
    }
}

/// Index of the head of a table.
pub struct Here;

/// Index of an element in the tail of a table.
pub struct There<I>(PhantomData<I>);

// ============================================================================
// Entry
// ============================================================================

/// Key of signature `S`.
pub type KeyOf<S> = <S as Signature>::Key;

/// The entry a registrable value `C` is stored in.
pub type EntryOf<C> = Entry<
    KeyOf<<<C as IntoStored>::Stored as Stored>::Signature>,
    <C as IntoStored>::Stored,
>;

/// An entry holding a plain function pointer of signature `S`.
pub type RawEntry<S> = Entry<KeyOf<S>, Raw<S>>;

/// One overload: a stored callable tagged with its parameter key `K`.
///
/// `K` always equals the key of the stored callable's signature; entries can
/// only be created through [`Entry::new`] and [`entry`].
pub struct Entry<K, St> {
    stored: St,
    _key: PhantomData<fn() -> K>,
}

impl<St: Stored> Entry<KeyOf<St::Signature>, St> {
    /// Creates an entry for an already stored callable.
    pub fn new(stored: St) -> Self {
        Self {
            stored,
            _key: PhantomData,
        }
    }
}

impl<K, St> Entry<K, St> {
    /// The stored callable.
    pub fn stored(&self) -> &St {
        &self.stored
    }

    /// Unwraps the stored callable.
    pub fn into_stored(self) -> St {
        self.stored
    }
}

impl<K: 'static, St: Stored> Entry<K, St> {
    /// Runtime description of the entry.
    pub fn info(&self) -> EntryInfo {
        EntryInfo::of::<K, St>()
    }
}

impl<K, St: Clone> Clone for Entry<K, St> {
    fn clone(&self) -> Self {
        Self {
            stored: self.stored.clone(),
            _key: PhantomData,
        }
    }
}

impl<K, St: Copy> Copy for Entry<K, St> {}

impl<K: 'static, St: Stored> fmt::Debug for Entry<K, St> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &ParamKey::of::<K>())
            .field("kind", &St::KIND)
            .finish()
    }
}

/// Wraps a registrable value into a table entry.
pub fn entry<C: IntoStored>(callable: C) -> EntryOf<C> {
    Entry::new(callable.into_stored())
}

/// Runtime description of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    /// The normalized parameter key.
    pub key: ParamKey,
    /// How the callable is held.
    pub kind: StorageKind,
    /// Number of parameters.
    pub arity: usize,
}

impl EntryInfo {
    fn of<K: 'static, St: Stored>() -> Self {
        Self {
            key: ParamKey::of::<K>(),
            kind: St::KIND,
            arity: <St::Signature as Signature>::ARITY,
        }
    }
}

impl fmt::Display for EntryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.key, self.kind)
    }
}

// ============================================================================
// Table
// ============================================================================

/// Runtime view of a dispatch table.
pub trait Table {
    /// Number of entries.
    const LEN: usize;

    /// Appends a description of every entry to `out`, in table order.
    fn describe(out: &mut Vec<EntryInfo>);

    /// Whether some entry has the key identified by `id`.
    fn contains_key(id: TypeId) -> bool;

    /// Whether the entry with key `id` is the callable at address `identity`.
    fn matches(&self, id: TypeId, identity: usize) -> bool;
}

impl Table for HNil {
    const LEN: usize = 0;

    fn describe(_out: &mut Vec<EntryInfo>) {}

    fn contains_key(_id: TypeId) -> bool {
        false
    }

    fn matches(&self, _id: TypeId, _identity: usize) -> bool {
        false
    }
}

impl<K, St, T> Table for HCons<Entry<K, St>, T>
where
    K: 'static,
    St: Stored,
    T: Table,
{
    const LEN: usize = 1 + T::LEN;

    fn describe(out: &mut Vec<EntryInfo>) {
        out.push(EntryInfo::of::<K, St>());
        T::describe(out);
    }

    fn contains_key(id: TypeId) -> bool {
        TypeId::of::<K>() == id || T::contains_key(id)
    }

    fn matches(&self, id: TypeId, identity: usize) -> bool {
        if TypeId::of::<K>() == id {
            return self.head.stored.identity() == Some(identity);
        }
        self.tail.matches(id, identity)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Compile-time lookup of the entry with key `K`.
#[diagnostic::on_unimplemented(
    message = "no overload accepts arguments with key `{K}`",
    label = "no matching signature in this table",
    note = "if the key appears twice the lookup is ambiguous"
)]
pub trait Select<K, I> {
    /// Signature of the selected entry.
    type Signature: Signature;
    /// Stored callable of the selected entry.
    type Stored: Stored<Signature = Self::Signature> + Call<Self::Signature>;

    /// Borrows the selected callable.
    fn select(&self) -> &Self::Stored;
}

impl<K, St, T> Select<K, Here> for HCons<Entry<K, St>, T>
where
    St: Stored + Call<<St as Stored>::Signature>,
{
    type Signature = St::Signature;
    type Stored = St;

    #[inline]
    fn select(&self) -> &St {
        &self.head.stored
    }
}

impl<K, H, T, I> Select<K, There<I>> for HCons<H, T>
where
    T: Select<K, I>,
{
    type Signature = T::Signature;
    type Stored = T::Stored;

    #[inline]
    fn select(&self) -> &T::Stored {
        self.tail.select()
    }
}

/// Removal of the entry with key `K`.
pub trait Pluck<K, I> {
    /// The removed entry.
    type Entry;
    /// The table without it.
    type Remainder;

    /// Splits the entry off.
    fn pluck(self) -> (Self::Entry, Self::Remainder);
}

impl<K, St, T> Pluck<K, Here> for HCons<Entry<K, St>, T> {
    type Entry = Entry<K, St>;
    type Remainder = T;

    fn pluck(self) -> (Entry<K, St>, T) {
        (self.head, self.tail)
    }
}

impl<K, H, T, I> Pluck<K, There<I>> for HCons<H, T>
where
    T: Pluck<K, I>,
{
    type Entry = T::Entry;
    type Remainder = HCons<H, T::Remainder>;

    fn pluck(self) -> (T::Entry, HCons<H, T::Remainder>) {
        let (entry, rest) = self.tail.pluck();
        (entry, HCons::new(self.head, rest))
    }
}

/// Addition of an element at the end of a table.
pub trait Append<E> {
    /// The extended table.
    type Output;

    /// Appends `element`.
    fn append(self, element: E) -> Self::Output;
}

impl<E> Append<E> for HNil {
    type Output = HCons<E, HNil>;

    fn append(self, element: E) -> Self::Output {
        HCons::new(element, HNil)
    }
}

impl<H, T, E> Append<E> for HCons<H, T>
where
    T: Append<E>,
{
    type Output = HCons<H, T::Output>;

    fn append(self, element: E) -> Self::Output {
        HCons::new(self.head, self.tail.append(element))
    }
}
