//! # overload - Typed Overload Dispatch
//!
//! `overload` holds a fixed set of callables, each answering to a distinct
//! parameter list, and presents them as one callable surface. The callable to
//! run is selected at compile time from the argument types.
//!
//! ## Quick Start
//!
//! ```rust
//! use overload::prelude::*;
//!
//! #[overload]
//! fn double(x: &i32) -> i32 {
//!     x * 2
//! }
//!
//! fn greet(name: &str) -> String {
//!     format!("hello {name}")
//! }
//!
//! # fn main() -> Result<(), overload::BuildError> {
//! let o = make!(
//!     double,
//!     greet as fn(&str) -> String,
//!     Erased::<fn(u8, u8) -> u8>::new(|a: u8, b: u8| a + b),
//! )?;
//!
//! assert_eq!(call!(o, 21_i32), 42);
//! assert_eq!(call!(o, "bob"), "hello bob");
//! assert_eq!(call!(o, 1_u8, 2_u8), 3);
//! assert_eq!(o.size(), 3);
//! assert!(o.exists::<fn(&str) -> String>());
//! # Ok(())
//! # }
//! ```
//!
//! ## Keys
//!
//! Overloads are told apart by their normalized parameter key. References,
//! mutable references and values of the same type share a key, so
//! `fn(i32)` and `fn(&i32)` cannot be registered together:
//!
//! ```rust
//! use overload::prelude::*;
//!
//! fn by_value(x: i32) -> i32 { x }
//! fn by_ref(x: &i32) -> i32 { *x }
//!
//! let err = make!(by_value as fn(i32) -> i32, by_ref as fn(&i32) -> i32).unwrap_err();
//! assert!(err.to_string().contains("only unique signatures are allowed"));
//! ```
//!
//! ## Compile-time errors
//!
//! Calling with arguments no overload accepts does not compile:
//!
//! ```rust,compile_fail
//! use overload::prelude::*;
//!
//! fn square(x: &i32) -> i32 { x * x }
//!
//! let o = make!(square as fn(&i32) -> i32).unwrap();
//! call!(o, "not a number");
//! ```
//!
//! A table with a repeated key cannot be called with that key, even when it
//! never went through validation:
//!
//! ```rust,compile_fail
//! use overload::{map, table};
//!
//! fn a(x: i32) -> i32 { x }
//! fn b(x: &i32) -> i32 { *x }
//!
//! let t = table![a as fn(i32) -> i32, b as fn(&i32) -> i32];
//! map::invoke(&t, (1_i32,));
//! ```
//!
//! A `&mut` parameter needs a mutable borrow:
//!
//! ```rust,compile_fail
//! use overload::prelude::*;
//!
//! fn bump(x: &mut i32) { *x += 1; }
//!
//! let o = make!(bump as fn(&mut i32)).unwrap();
//! let v = 1_i32;
//! call!(o, &v);
//! ```
//!
//! Generic functions have no single signature:
//!
//! ```rust,compile_fail
//! use overload::prelude::*;
//!
//! #[overload]
//! fn identity<T>(x: T) -> T { x }
//! ```
//!
//! ## Features
//!
//! - `macros` (default): `#[overload]` and `#[derive(Param)]`
//! - `tracing`: construction, rejection, insert and erase events

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use overload_core::{
    Accept, Arguments, AsParamMut, AsParamRef, BuildError, BuildResult, ByMove, ByRef, Call,
    Callable, Candidate, Erased, IntoParam, IntoStored, OverloadError, Param, ParamKey, Raw,
    Signature, StorageKind, Stored, SyncErased, Void, impl_param,
};

// Tables and the registry
pub use overload_std::{
    Overloads, TableOf, call, make,
    registry::{Builder, Overloaded},
    table,
    table::{Entry, EntryInfo, HCons, HNil, Here, There},
};

#[cfg(feature = "macros")]
pub use overload_macros::{Param, overload};

/// Free functions over bare dispatch tables.
pub mod map {
    #![allow(clippy::wildcard_imports)]
    pub use overload_std::map::*;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use overload_std::testing::*;
}

/// Prelude module - common imports for overload.
///
/// # Usage
///
/// ```rust,ignore
/// use overload::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Errors
        BuildError,
        // Storage
        ByMove,
        ByRef,
        Erased,
        SyncErased,
        // Registry
        Overloaded,
        Overloads,
        // Parameters
        Param,
        // Macros
        call,
        make,
        table,
    };

    #[cfg(feature = "macros")]
    pub use crate::overload;
}
