//! Release history snapshots kept on the managed release's status.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use relwatch_store::{HookPhase, Release, ReleaseStatus};
use serde::{Deserialize, Serialize};

/// Last observed run of a single test hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TestHookStatus {
    pub last_started: Option<DateTime<Utc>>,
    pub last_completed: Option<DateTime<Utc>>,
    pub phase: HookPhase,
}

/// Test hooks executed against a release version, keyed by hook name.
pub type TestHooks = BTreeMap<String, TestHookStatus>;

/// Collect the test hooks of a release and the outcome of their last run.
pub fn test_hooks_from_release(release: &Release) -> TestHooks {
    release
        .hooks
        .iter()
        .filter(|hook| hook.is_test())
        .map(|hook| {
            (
                hook.name.clone(),
                TestHookStatus {
                    last_started: hook.last_run.started_at,
                    last_completed: hook.last_run.completed_at,
                    phase: hook.last_run.phase,
                },
            )
        })
        .collect()
}

/// Persisted record of one release version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    /// `sha256:` digest of the observation this snapshot was derived from.
    pub digest: String,
    pub name: String,
    pub namespace: String,
    pub version: u32,
    pub status: ReleaseStatus,
    pub chart_name: String,
    pub chart_version: String,
    pub app_version: String,
    /// `sha256:` digest of the values the release was rendered with.
    pub config_digest: String,
    pub first_deployed: Option<DateTime<Utc>>,
    pub last_deployed: Option<DateTime<Utc>>,
    pub deleted: Option<DateTime<Utc>>,
    /// Set by the test action; not derivable from the release record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_hooks: Option<TestHooks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oci_digest: Option<String>,
}

impl Snapshot {
    /// Whether this snapshot records the given release version.
    pub fn targets(&self, name: &str, namespace: &str, version: u32) -> bool {
        self.name == name && self.namespace == namespace && self.version == version
    }

    /// `namespace/name`
    pub fn full_release_name(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }

    /// `namespace/name.vN`
    pub fn version_name(&self) -> String {
        format!("{}/{}.v{}", self.namespace, self.name, self.version)
    }

    pub fn get_test_hooks(&self) -> Option<&TestHooks> {
        self.test_hooks.as_ref()
    }

    pub fn set_test_hooks(&mut self, hooks: Option<TestHooks>) {
        self.test_hooks = hooks;
    }

    /// A test action has run against this version, even if it had no hooks.
    pub fn has_been_tested(&self) -> bool {
        self.test_hooks.is_some()
    }

    pub fn has_test_in_phase(&self, phase: HookPhase) -> bool {
        self.test_hooks
            .as_ref()
            .is_some_and(|hooks| hooks.values().any(|h| h.phase == phase))
    }
}

/// Release history, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Snapshots(Vec<Snapshot>);

impl Snapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.0.first()
    }

    /// Mutable access to the latest snapshot, e.g. to record test hooks.
    pub fn latest_mut(&mut self) -> Option<&mut Snapshot> {
        self.0.first_mut()
    }

    /// The most recent release before the latest one that is a valid rollback
    /// target: deployed or superseded and, unless `ignore_tests`, without a
    /// failed test hook.
    pub fn previous(&self, ignore_tests: bool) -> Option<&Snapshot> {
        self.0.iter().skip(1).find(|snap| {
            matches!(
                snap.status,
                ReleaseStatus::Deployed | ReleaseStatus::Superseded
            ) && (ignore_tests || !snap.has_test_in_phase(HookPhase::Failed))
        })
    }

    /// Keep the newest `max` snapshots. `max == 0` keeps everything.
    pub fn truncate(&mut self, max: usize) {
        if max > 0 {
            self.0.truncate(max);
        }
    }

    pub(crate) fn prepend(&mut self, snapshot: Snapshot) {
        self.0.insert(0, snapshot);
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Snapshot> {
        self.0.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.0.iter()
    }
}

impl From<Vec<Snapshot>> for Snapshots {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self(snapshots)
    }
}

impl<'a> IntoIterator for &'a Snapshots {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
