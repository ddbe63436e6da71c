//! The managed release object and the per-pass request wrapping it.

use serde::{Deserialize, Serialize};

use super::condition::Conditions;
use super::error::{ReconcileError, Result};
use super::snapshot::{Snapshot, Snapshots};

/// Number of snapshots kept in history when `max_history` is unset.
pub const DEFAULT_MAX_HISTORY: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    /// Incremented on every spec change.
    pub generation: i64,
}

/// Test action configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestSpec {
    pub enable: bool,
    /// Test failures neither fail the release nor trigger remediation.
    pub ignore_failures: bool,
}

impl TestSpec {
    /// Tests run and their outcome counts towards readiness.
    pub fn is_required(&self) -> bool {
        self.enable && !self.ignore_failures
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManagedReleaseSpec {
    /// Defaults to the object name.
    pub release_name: Option<String>,
    /// Defaults to the object namespace.
    pub target_namespace: Option<String>,
    pub max_history: Option<usize>,
    pub test: TestSpec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManagedReleaseStatus {
    pub history: Snapshots,
    pub conditions: Conditions,
}

/// The controlled object: a desired release plus its observed status.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ManagedRelease {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: ManagedReleaseSpec,
    #[serde(default)]
    pub status: ManagedReleaseStatus,
}

impl ManagedRelease {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, generation: i64) -> Self {
        Self {
            metadata: ObjectMeta {
                name: name.into(),
                namespace: namespace.into(),
                generation,
            },
            ..Self::default()
        }
    }

    pub fn with_test(mut self, enable: bool, ignore_failures: bool) -> Self {
        self.spec.test = TestSpec {
            enable,
            ignore_failures,
        };
        self
    }

    pub fn get_test(&self) -> &TestSpec {
        &self.spec.test
    }

    pub fn release_name(&self) -> &str {
        self.spec
            .release_name
            .as_deref()
            .unwrap_or(&self.metadata.name)
    }

    pub fn release_namespace(&self) -> &str {
        self.spec
            .target_namespace
            .as_deref()
            .unwrap_or(&self.metadata.namespace)
    }

    /// Drop snapshots beyond the configured history limit.
    pub fn truncate_history(&mut self) {
        let max = self.spec.max_history.unwrap_or(DEFAULT_MAX_HISTORY);
        self.status.history.truncate(max);
    }
}

/// The unit of work for one reconciliation pass.
///
/// Holds the object exclusively for the duration of the pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub object: ManagedRelease,
}

impl Request {
    pub fn new(object: ManagedRelease) -> Self {
        Self { object }
    }

    /// Generation of the object for this pass.
    pub fn generation(&self) -> i64 {
        self.object.metadata.generation
    }

    /// The most recent snapshot, required by actions that operate on an
    /// existing release (test, rollback, uninstall).
    pub fn latest_snapshot(&self) -> Result<&Snapshot> {
        self.object
            .status
            .history
            .latest()
            .ok_or(ReconcileError::NoLatest)
    }

    pub fn into_object(self) -> ManagedRelease {
        self.object
    }
}
