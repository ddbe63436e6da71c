//! Storage trait for the release store
//!
//! The store is append-only and keyed by (`namespace`, `name`, `version`).
//! Backends are async and interchangeable; an in-memory fake is provided in
//! the `fakes` module.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::release::Release;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Release store backend.
///
/// Semantics:
/// - `create` writes a new version. Fails if the version already exists.
/// - `update` rewrites an existing version in place (status transitions).
/// - `last` returns the highest version for a release, if any.
/// - `history` returns every version in reverse order (newest first).
#[async_trait]
pub trait ReleaseStore: Send + Sync {
    /// Write a new release version.
    async fn create(&self, release: &Release) -> StoreResult<()>;

    /// Rewrite an existing release version.
    async fn update(&self, release: &Release) -> StoreResult<()>;

    /// Fetch one release version.
    async fn get(&self, namespace: &str, name: &str, version: u32) -> StoreResult<Release>;

    /// Fetch the highest version of a release, if any.
    async fn last(&self, namespace: &str, name: &str) -> StoreResult<Option<Release>>;

    /// Fetch all versions of a release (newest first).
    async fn history(&self, namespace: &str, name: &str) -> StoreResult<Vec<Release>>;
}
