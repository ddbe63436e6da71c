//! Observations of release store writes.

use std::collections::BTreeMap;

use relwatch_store::{ChartMetadata, Hook, Release, ReleaseInfo};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::snapshot::Snapshot;

/// Immutable copy of one release as it was written to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReleaseObservation {
    pub name: String,
    pub namespace: String,
    pub version: u32,
    pub info: ReleaseInfo,
    pub chart: ChartMetadata,
    pub config: serde_json::Value,
    pub manifest: String,
    pub hooks: Vec<Hook>,
    pub labels: BTreeMap<String, String>,
    pub oci_digest: Option<String>,
}

impl From<&Release> for ReleaseObservation {
    fn from(release: &Release) -> Self {
        Self {
            name: release.name.clone(),
            namespace: release.namespace.clone(),
            version: release.version,
            info: release.info.clone(),
            chart: release.chart.clone(),
            config: release.config.clone(),
            manifest: release.manifest.clone(),
            hooks: release.hooks.clone(),
            labels: release.labels.clone(),
            oci_digest: release.oci_digest.clone(),
        }
    }
}

impl ReleaseObservation {
    pub fn targets(&self, name: &str, namespace: &str, version: u32) -> bool {
        self.name == name && self.namespace == namespace && self.version == version
    }

    /// `namespace/name.vN`
    pub fn version_name(&self) -> String {
        format!("{}/{}.v{}", self.namespace, self.name, self.version)
    }

    /// `sha256:` digest over the full observation.
    pub fn digest(&self) -> String {
        let bytes =
            serde_json::to_vec(self).expect("release observations must be serializable for hashing");
        sha256_digest(&bytes)
    }

    /// `sha256:` digest over the values the release was rendered with.
    pub fn config_digest(&self) -> String {
        sha256_digest(self.config.to_string().as_bytes())
    }

    /// Derive the persisted snapshot. Test hooks are left unset.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            digest: self.digest(),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            version: self.version,
            status: self.info.status,
            chart_name: self.chart.name.clone(),
            chart_version: self.chart.version.clone(),
            app_version: self.chart.app_version.clone(),
            config_digest: self.config_digest(),
            first_deployed: self.info.first_deployed,
            last_deployed: self.info.last_deployed,
            deleted: self.info.deleted,
            test_hooks: None,
            oci_digest: self.oci_digest.clone(),
        }
    }
}

fn sha256_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{}", hex::encode(hasher.finalize()))
}
