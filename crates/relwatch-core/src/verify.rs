//! Checks the action layer runs before handing a pass to the summarizer.

use crate::domain::{ReconcileError, ReleaseObservation, Request, Result, Snapshot};
use crate::obs;

/// Fail with [`ReconcileError::ReleaseMismatch`] unless `observed` is the
/// release version `expected` records.
pub fn verify_release_targets(expected: &Snapshot, observed: &ReleaseObservation) -> Result<()> {
    if expected.targets(&observed.name, &observed.namespace, observed.version) {
        return Ok(());
    }
    let (expected, actual) = (expected.version_name(), observed.version_name());
    obs::emit_release_mismatch(&expected, &actual);
    Err(ReconcileError::ReleaseMismatch { expected, actual })
}

/// Require a latest snapshot and check that `observed` matches it.
pub fn verify_latest(req: &Request, observed: &ReleaseObservation) -> Result<()> {
    let latest = req.latest_snapshot()?;
    verify_release_targets(latest, observed)
}

#[cfg(test)]
mod tests {
    use relwatch_store::Release;

    use super::*;
    use crate::domain::ManagedRelease;

    fn observation(version: u32) -> ReleaseObservation {
        ReleaseObservation::from(&Release::new("podinfo", "apps", version))
    }

    #[test]
    fn matching_release_passes() {
        let snap = observation(3).to_snapshot();
        assert!(verify_release_targets(&snap, &observation(3)).is_ok());
    }

    #[test]
    fn different_version_is_a_mismatch() {
        let snap = observation(3).to_snapshot();
        let err = verify_release_targets(&snap, &observation(4)).unwrap_err();
        assert_eq!(
            err,
            ReconcileError::ReleaseMismatch {
                expected: "apps/podinfo.v3".to_string(),
                actual: "apps/podinfo.v4".to_string(),
            }
        );
    }

    #[test]
    fn verify_latest_without_history_is_no_latest() {
        let req = Request::new(ManagedRelease::new("podinfo", "apps", 1));
        assert_eq!(
            verify_latest(&req, &observation(1)),
            Err(ReconcileError::NoLatest)
        );
    }
}
