//! Structured observability hooks for the release status engine.
//!
//! This module provides:
//! - A reconcile-scoped tracing span via the `ReleaseSpan` RAII guard
//! - Emission functions for history and condition changes
//!
//! Filter with `RUST_LOG` (e.g. `RUST_LOG=relwatch_core=debug`).

use tracing::{debug, info, warn};

use crate::domain::{ConditionStatus, ConditionType};

/// RAII guard that enters a span for one reconciliation pass of an object.
///
/// # Example
///
/// ```ignore
/// let _span = ReleaseSpan::enter("apps", "podinfo");
/// // Every event emitted below carries release = "apps/podinfo"
/// ```
pub struct ReleaseSpan {
    _span: tracing::span::EnteredSpan,
}

impl ReleaseSpan {
    pub fn enter(namespace: &str, name: &str) -> Self {
        let release = format!("{namespace}/{name}");
        let span = tracing::info_span!("relwatch.reconcile", release = %release);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: a release write was observed during an action.
pub fn emit_release_observed(version_name: &str, status: &str) {
    debug!(event = "release.observed", release = %version_name, status = %status);
}

/// Emit event: a snapshot was prepended to the history.
pub fn emit_history_recorded(version_name: &str, history_len: usize) {
    info!(
        event = "history.recorded",
        release = %version_name,
        history_len = history_len,
    );
}

/// Emit event: an existing snapshot was replaced in place.
pub fn emit_snapshot_replaced(version_name: &str, index: usize, kept_test_hooks: bool) {
    info!(
        event = "history.snapshot_replaced",
        release = %version_name,
        index = index,
        kept_test_hooks = kept_test_hooks,
    );
}

/// Emit event: a stale Remediated condition was removed.
pub fn emit_remediation_cleared(remediated_generation: i64, cleared_by: ConditionType) {
    info!(
        event = "condition.remediation_cleared",
        remediated_generation = remediated_generation,
        cleared_by = %cleared_by,
    );
}

/// Emit event: the Ready condition was recomputed.
pub fn emit_ready_summarized(
    status: ConditionStatus,
    representative: ConditionType,
    reason: &str,
    generation: i64,
) {
    info!(
        event = "condition.ready_summarized",
        status = %status,
        representative = %representative,
        reason = %reason,
        generation = generation,
    );
}

/// Emit event: an action produced a release other than the one it targeted.
pub fn emit_release_mismatch(expected: &str, actual: &str) {
    warn!(event = "release.mismatch", expected = %expected, actual = %actual);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_span_create() {
        let _span = ReleaseSpan::enter("apps", "podinfo");
    }
}
