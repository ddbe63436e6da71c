//! In-memory implementation of the release store for testing.
//!
//! Provides `MemoryReleaseStore`, which satisfies the `ReleaseStore`
//! contract without any external dependencies.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::release::Release;
use crate::storage_traits::{ReleaseStore, StoreResult};

type ReleaseKey = (String, String);

/// In-memory release store backed by a `BTreeMap<(namespace, name), BTreeMap<version, Release>>`.
#[derive(Debug, Default)]
pub struct MemoryReleaseStore {
    releases: Mutex<BTreeMap<ReleaseKey, BTreeMap<u32, Release>>>,
}

impl MemoryReleaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ReleaseKey, BTreeMap<u32, Release>>> {
        self.releases.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn key(namespace: &str, name: &str) -> ReleaseKey {
    (namespace.to_string(), name.to_string())
}

fn not_found(namespace: &str, name: &str, version: u32) -> StoreError {
    StoreError::NotFound {
        namespace: namespace.to_string(),
        name: name.to_string(),
        version,
    }
}

#[async_trait]
impl ReleaseStore for MemoryReleaseStore {
    async fn create(&self, release: &Release) -> StoreResult<()> {
        if release.version == 0 {
            return Err(StoreError::InvalidVersion {
                name: release.name.clone(),
                version: release.version,
            });
        }
        let mut releases = self.lock();
        let versions = releases
            .entry(key(&release.namespace, &release.name))
            .or_default();
        if versions.contains_key(&release.version) {
            return Err(StoreError::AlreadyExists {
                namespace: release.namespace.clone(),
                name: release.name.clone(),
                version: release.version,
            });
        }
        versions.insert(release.version, release.clone());
        Ok(())
    }

    async fn update(&self, release: &Release) -> StoreResult<()> {
        let mut releases = self.lock();
        let slot = releases
            .get_mut(&key(&release.namespace, &release.name))
            .and_then(|versions| versions.get_mut(&release.version))
            .ok_or_else(|| not_found(&release.namespace, &release.name, release.version))?;
        *slot = release.clone();
        Ok(())
    }

    async fn get(&self, namespace: &str, name: &str, version: u32) -> StoreResult<Release> {
        let releases = self.lock();
        releases
            .get(&key(namespace, name))
            .and_then(|versions| versions.get(&version))
            .cloned()
            .ok_or_else(|| not_found(namespace, name, version))
    }

    async fn last(&self, namespace: &str, name: &str) -> StoreResult<Option<Release>> {
        let releases = self.lock();
        Ok(releases
            .get(&key(namespace, name))
            .and_then(|versions| versions.values().next_back().cloned()))
    }

    async fn history(&self, namespace: &str, name: &str) -> StoreResult<Vec<Release>> {
        let releases = self.lock();
        Ok(releases
            .get(&key(namespace, name))
            .map(|versions| versions.values().rev().cloned().collect())
            .unwrap_or_default())
    }
}
