//! Uniqueness check for dispatch tables.

use overload_core::{BuildError, BuildResult};

use crate::table::{EntryInfo, Table};

/// Checks that every entry of `T` has a distinct parameter key.
///
/// Reports the first repeated key together with the positions of both
/// entries.
pub fn validate<T: Table>() -> BuildResult<()> {
    let mut entries: Vec<EntryInfo> = Vec::with_capacity(T::LEN);
    T::describe(&mut entries);

    for (second, entry) in entries.iter().enumerate() {
        if let Some(first) = entries[..second].iter().position(|e| e.key == entry.key) {
            #[cfg(feature = "tracing")]
            tracing::warn!(key = %entry.key, first, second, "duplicate overload signature");

            return Err(BuildError::DuplicateSignature {
                key: entry.key,
                first,
                second,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HCons, HNil, RawEntry};
    use overload_core::ParamKey;

    type Unique = HCons<RawEntry<fn(i32)>, HCons<RawEntry<fn(u8)>, HNil>>;
    type Repeated = HCons<
        RawEntry<fn(i32)>,
        HCons<RawEntry<fn(u8)>, HCons<RawEntry<fn(&i32) -> bool>, HNil>>,
    >;

    #[test]
    fn test_empty_and_unique_tables_pass() {
        assert_eq!(validate::<HNil>(), Ok(()));
        assert_eq!(validate::<Unique>(), Ok(()));
    }

    #[test]
    fn test_reference_and_value_collide() {
        let err = validate::<Repeated>().unwrap_err();
        assert_eq!(
            err,
            BuildError::DuplicateSignature {
                key: ParamKey::of::<(i32,)>(),
                first: 0,
                second: 2,
            }
        );
    }

    #[test]
    fn test_return_type_does_not_distinguish() {
        type T = HCons<RawEntry<fn() -> u8>, HCons<RawEntry<fn() -> i64>, HNil>>;
        assert!(validate::<T>().is_err());
    }
}
