//! # overload-std
//!
//! Dispatch tables and the registry for typed overloads.
//!
//! This crate provides:
//! - **Dispatch tables**: [`table::HCons`], [`table::HNil`], and the
//!   type-level [`table::Select`], [`table::Pluck`], [`table::Append`]
//! - **Validation**: [`validate::validate`], rejecting repeated keys
//! - **Registry**: [`registry::Overloaded`] and its [`registry::Builder`]
//! - **Free functions** over bare tables: [`map`]
//! - **Macros**: [`table!`], [`make!`], [`call!`], [`Overloads!`]
//! - **Testing helpers**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use overload_core;

// Modules
mod macros;
pub mod map;
pub mod registry;
pub mod table;
pub mod testing;
pub mod validate;
