//! Error types for relwatch-store

use thiserror::Error;

/// Errors returned by release store backends.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No release exists for the requested key
    #[error("release not found: {namespace}/{name}.v{version}")]
    NotFound {
        namespace: String,
        name: String,
        version: u32,
    },

    /// A release with the same key was already created
    #[error("release already exists: {namespace}/{name}.v{version}")]
    AlreadyExists {
        namespace: String,
        name: String,
        version: u32,
    },

    /// Release versions start at 1
    #[error("invalid release version {version} for {name}: versions start at 1")]
    InvalidVersion { name: String, version: u32 },
}
