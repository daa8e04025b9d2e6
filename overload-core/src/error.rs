//! Error types for overload registries.
//!
//! - [`OverloadError`] - Top-level error type
//! - [`BuildError`] - Errors while constructing or extending a registry

use crate::ParamKey;
use thiserror::Error;

/// Result of building or extending a registry.
pub type BuildResult<T> = Result<T, BuildError>;

/// Top-level error type for all overload operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverloadError {
    /// A registry could not be built.
    #[error("build error: {0}")]
    Build(#[from] BuildError),
}

/// Errors that can occur while building a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Two entries normalize to the same parameter key.
    #[error(
        "only unique signatures are allowed: `{key}` is registered at positions {first} and {second}"
    )]
    DuplicateSignature {
        /// The repeated key.
        key: ParamKey,
        /// Position of the first entry with this key.
        first: usize,
        /// Position of the conflicting entry.
        second: usize,
    },
}

impl BuildError {
    /// The key this error is about.
    pub fn key(&self) -> ParamKey {
        match self {
            BuildError::DuplicateSignature { key, .. } => *key,
        }
    }
}
