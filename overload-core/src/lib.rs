//! # overload-core
//!
//! Core traits for typed overload dispatch.
//!
//! An overload set maps distinct parameter lists to callables. This crate
//! defines the vocabulary the registry in `overload-std` is built from:
//!
//! - [`Signature`] - a fn-pointer type such as `fn(&i32) -> i32` naming one
//!   overload, with its normalized key, output, and argument tuple
//! - [`Call`] - the call contract, implemented by every matching `Fn`
//! - [`Param`] / [`Arguments`] - normalization of parameter and argument types
//!   into keys, so `fn(i32)` and `fn(&i32)` collide while `fn(i32)` and
//!   `fn(u8)` do not
//! - [`Stored`] / [`IntoStored`] - the storage policy: [`Raw`] pointers,
//!   borrowed [`ByRef`] functors, owned [`ByMove`] functors, and boxed
//!   [`Erased`] or [`SyncErased`] closures
//!
//! # Error Types
//!
//! - [`OverloadError`] - Top-level error type
//! - [`BuildError`] - Construction errors

// `fn(T)` and `fn(&T)` are distinct signatures with separate impls.
#![allow(coherence_leak_check)]
#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod key;
mod param;
mod signature;
mod storage;

pub use error::{BuildError, BuildResult, OverloadError};
pub use key::ParamKey;
pub use param::{Arguments, AsParamMut, AsParamRef, IntoParam, Param, Void};
pub use signature::{Accept, Call, Callable, Signature};
pub use storage::{
    ByMove, ByRef, Candidate, Erased, IntoStored, Raw, StorageKind, Stored, SyncErased,
};
