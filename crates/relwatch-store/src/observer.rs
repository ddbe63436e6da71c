//! Observing decorator for release stores.
//!
//! Wraps any [`ReleaseStore`] and reports every successful write to the
//! registered observers, in registration order. Reads and failed writes are
//! not reported.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::release::Release;
use crate::storage_traits::{ReleaseStore, StoreResult};

/// Callback invoked once per release written to the store.
pub type ObserveFn = Arc<dyn Fn(&Release) + Send + Sync>;

/// A [`ReleaseStore`] that reports successful writes to observers.
pub struct ObservingStore<S> {
    inner: S,
    observers: Vec<ObserveFn>,
}

impl<S> ObservingStore<S>
where
    S: ReleaseStore,
{
    pub fn new(inner: S, observers: Vec<ObserveFn>) -> Self {
        Self { inner, observers }
    }

    /// Register an additional observer.
    pub fn with_observer(mut self, observer: ObserveFn) -> Self {
        self.observers.push(observer);
        self
    }

    /// Unwrap the decorated store.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn notify(&self, release: &Release) {
        trace!(release = %release.key(), observers = self.observers.len(), "observed release write");
        for observe in &self.observers {
            observe(release);
        }
    }
}

#[async_trait]
impl<S> ReleaseStore for ObservingStore<S>
where
    S: ReleaseStore,
{
    async fn create(&self, release: &Release) -> StoreResult<()> {
        self.inner.create(release).await?;
        self.notify(release);
        Ok(())
    }

    async fn update(&self, release: &Release) -> StoreResult<()> {
        self.inner.update(release).await?;
        self.notify(release);
        Ok(())
    }

    async fn get(&self, namespace: &str, name: &str, version: u32) -> StoreResult<Release> {
        self.inner.get(namespace, name, version).await
    }

    async fn last(&self, namespace: &str, name: &str) -> StoreResult<Option<Release>> {
        self.inner.last(namespace, name).await
    }

    async fn history(&self, namespace: &str, name: &str) -> StoreResult<Vec<Release>> {
        self.inner.history(namespace, name).await
    }
}
