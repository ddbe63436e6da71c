//! Release records as written to the release store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a single release version.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseStatus {
    #[default]
    Unknown,
    Deployed,
    Uninstalled,
    Superseded,
    Failed,
    Uninstalling,
    PendingInstall,
    PendingUpgrade,
    PendingRollback,
}

impl ReleaseStatus {
    /// Kebab-case name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Unknown => "unknown",
            ReleaseStatus::Deployed => "deployed",
            ReleaseStatus::Uninstalled => "uninstalled",
            ReleaseStatus::Superseded => "superseded",
            ReleaseStatus::Failed => "failed",
            ReleaseStatus::Uninstalling => "uninstalling",
            ReleaseStatus::PendingInstall => "pending-install",
            ReleaseStatus::PendingUpgrade => "pending-upgrade",
            ReleaseStatus::PendingRollback => "pending-rollback",
        }
    }

    /// Whether an action is still in flight for this release.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            ReleaseStatus::PendingInstall
                | ReleaseStatus::PendingUpgrade
                | ReleaseStatus::PendingRollback
        )
    }
}

impl std::fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment bookkeeping for a release.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReleaseInfo {
    pub first_deployed: Option<DateTime<Utc>>,
    pub last_deployed: Option<DateTime<Utc>>,
    pub deleted: Option<DateTime<Utc>>,
    pub description: String,
    pub status: ReleaseStatus,
}

/// Chart the release was rendered from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartMetadata {
    pub name: String,
    pub version: String,
    pub app_version: String,
}

/// Lifecycle events a hook is bound to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum HookEvent {
    PreInstall,
    PostInstall,
    PreDelete,
    PostDelete,
    PreUpgrade,
    PostUpgrade,
    PreRollback,
    PostRollback,
    Test,
}

/// Outcome of the last hook execution.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HookPhase {
    #[default]
    Unknown,
    Running,
    Succeeded,
    Failed,
}

/// Timing and outcome of the last run of a hook.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HookExecution {
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub phase: HookPhase,
}

/// A hook resource carried by the release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hook {
    pub name: String,
    pub kind: String,
    pub events: Vec<HookEvent>,
    #[serde(default)]
    pub last_run: HookExecution,
}

impl Hook {
    /// Whether this hook runs as part of a test action.
    pub fn is_test(&self) -> bool {
        self.events.contains(&HookEvent::Test)
    }
}

/// One versioned write of a named release.
///
/// The store is append-only per (`namespace`, `name`): every install,
/// upgrade or rollback writes a new `version`, while status transitions of an
/// existing version are written as updates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    pub name: String,
    pub namespace: String,
    pub version: u32,
    pub info: ReleaseInfo,
    pub chart: ChartMetadata,
    /// Values the chart was rendered with.
    #[serde(default)]
    pub config: serde_json::Value,
    #[serde(default)]
    pub manifest: String,
    #[serde(default)]
    pub hooks: Vec<Hook>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Digest of the OCI artifact the chart was pulled from, if any.
    #[serde(default)]
    pub oci_digest: Option<String>,
}

impl Release {
    /// Create a release record with empty chart, values and hooks.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            version,
            info: ReleaseInfo::default(),
            chart: ChartMetadata::default(),
            config: serde_json::json!({}),
            manifest: String::new(),
            hooks: Vec::new(),
            labels: BTreeMap::new(),
            oci_digest: None,
        }
    }

    pub fn with_status(mut self, status: ReleaseStatus) -> Self {
        self.info.status = status;
        self
    }

    pub fn with_chart(
        mut self,
        name: impl Into<String>,
        version: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        self.chart = ChartMetadata {
            name: name.into(),
            version: version.into(),
            app_version: app_version.into(),
        };
        self
    }

    pub fn with_config(mut self, config: serde_json::Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_hook(mut self, hook: Hook) -> Self {
        self.hooks.push(hook);
        self
    }

    /// `namespace/name.vN`, the form used in logs and errors.
    pub fn key(&self) -> String {
        format!("{}/{}.v{}", self.namespace, self.name, self.version)
    }
}
