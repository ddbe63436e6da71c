//! Collection of release writes made by a single action, and folding them
//! into the object's history.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use relwatch_store::{ObserveFn, Release};

use crate::domain::{ManagedRelease, ReleaseObservation};
use crate::obs;

/// Releases observed to be written to the store during one action, keyed by
/// version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservedReleases(BTreeMap<u32, ReleaseObservation>);

/// An [`ObservedReleases`] shared with the observer handed to the store.
pub type SharedObservedReleases = Arc<Mutex<ObservedReleases>>;

impl ObservedReleases {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh set wrapped for sharing with [`observe_release`].
    pub fn shared() -> SharedObservedReleases {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Take the collected observations out of a shared set, leaving it empty.
    pub fn take(shared: &SharedObservedReleases) -> Self {
        let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *guard)
    }

    /// Record a release write. A later write of the same version replaces
    /// the earlier one.
    pub fn record(&mut self, release: &Release) {
        let observation = ReleaseObservation::from(release);
        obs::emit_release_observed(&observation.version_name(), release.info.status.as_str());
        self.0.insert(observation.version, observation);
    }

    pub fn get(&self, version: u32) -> Option<&ReleaseObservation> {
        self.0.get(&version)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Observed versions, highest first.
    pub fn sorted_versions(&self) -> Vec<u32> {
        self.0.keys().rev().copied().collect()
    }

    /// Fold the observations into the object's history.
    ///
    /// The highest version is always prepended as a new snapshot. For the
    /// remaining versions, in descending order, the first one that already
    /// has a snapshot in the history replaces it (keeping its test hooks),
    /// and processing stops there. Versions without a snapshot are skipped.
    pub fn record_on_object(&self, obj: &mut ManagedRelease) {
        let versions = self.sorted_versions();
        let Some((latest, rest)) = versions.split_first() else {
            return;
        };

        let history = &mut obj.status.history;
        let newest = &self.0[latest];
        history.prepend(newest.to_snapshot());
        obs::emit_history_recorded(&newest.version_name(), history.len());

        for version in rest {
            let observed = &self.0[version];
            let existing = history.iter_mut().enumerate().find(|(_, snap)| {
                snap.targets(&observed.name, &observed.namespace, observed.version)
            });
            if let Some((index, snap)) = existing {
                let mut replacement = observed.to_snapshot();
                replacement.set_test_hooks(snap.get_test_hooks().cloned());
                let kept_test_hooks = replacement.has_been_tested();
                *snap = replacement;
                obs::emit_snapshot_replaced(&observed.version_name(), index, kept_test_hooks);
                return;
            }
        }
    }
}

/// Build the store observer that records every write into `observed`.
pub fn observe_release(observed: &SharedObservedReleases) -> ObserveFn {
    let observed = Arc::clone(observed);
    Arc::new(move |release: &Release| {
        observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(release);
    })
}
