//! Declarative macros for building and calling registries.

/// Builds an unvalidated dispatch table from registrable values.
///
/// # Example
/// ```ignore
/// let table = table![double as fn(&i32) -> i32, Erased::<fn()>::new(|| ())];
/// ```
#[macro_export]
macro_rules! table {
    () => { $crate::table::HNil };
    ($head:expr $(, $rest:expr)* $(,)?) => {
        $crate::table::HCons::new(
            $crate::table::entry($head),
            $crate::table![$($rest),*],
        )
    };
}

/// Builds a validated registry.
///
/// Evaluates to `Result<Overloaded<_>, BuildError>`; two entries with the same
/// normalized parameter key are rejected.
///
/// # Example
/// ```ignore
/// let o = make!(double as fn(&i32) -> i32, greet as fn(&str) -> String)?;
/// ```
#[macro_export]
macro_rules! make {
    ($($callable:expr),* $(,)?) => {
        $crate::registry::Overloaded::new($crate::table![$($callable),*])
    };
}

/// Invokes a registry with the given arguments.
///
/// `call!(o, a, b)` is `o.invoke((a, b))`.
#[macro_export]
macro_rules! call {
    ($overloaded:expr $(, $arg:expr)* $(,)?) => {
        $overloaded.invoke(($($arg,)*))
    };
}

/// Names the registry type holding function pointers of the given signatures.
///
/// # Example
/// ```ignore
/// struct Calculator {
///     ops: Overloads![fn(Add, i32, i32) -> i32, fn(Sub, i32, i32) -> i32],
/// }
/// ```
#[macro_export]
macro_rules! Overloads {
    ($($sig:ty),* $(,)?) => {
        $crate::registry::Overloaded<$crate::TableOf![$($sig),*]>
    };
}

/// Names the table type holding function pointers of the given signatures.
#[macro_export]
macro_rules! TableOf {
    () => { $crate::table::HNil };
    ($head:ty $(, $rest:ty)* $(,)?) => {
        $crate::table::HCons<$crate::table::RawEntry<$head>, $crate::TableOf![$($rest),*]>
    };
}
