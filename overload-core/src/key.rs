//! Runtime descriptors for parameter keys.

use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
};

use crate::Signature;

/// A parameter key observed at runtime.
///
/// Two descriptors are equal when they describe the same key type. The name
/// is only used for display.
#[derive(Clone, Copy)]
pub struct ParamKey {
    id: TypeId,
    name: &'static str,
}

impl ParamKey {
    /// Describes the key type `K`.
    pub fn of<K: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<K>(),
            name: type_name::<K>(),
        }
    }

    /// Describes the key of signature `S`.
    pub fn of_signature<S: Signature>() -> Self {
        Self::of::<S::Key>()
    }

    /// The `TypeId` of the key.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human readable name of the key type.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ParamKey {}

impl Hash for ParamKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParamKey").field(&self.name).finish()
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
