//! Domain-level error taxonomy for relwatch.

/// Conditions the action layer checks before handing a pass to the
/// summarizer. Each kind calls for a different recovery path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// The object has no latest release, but the action requires one.
    #[error("no latest release")]
    NoLatest,

    /// The release written by an action is not the one it targeted. Happens
    /// for actions that cannot address a release by version, such as tests.
    #[error("release mismatch: expected {expected}, got {actual}")]
    ReleaseMismatch { expected: String, actual: String },
}

impl ReconcileError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, ReconcileError::ReleaseMismatch { .. })
    }
}

/// Result type for reconcile-level checks.
pub type Result<T> = std::result::Result<T, ReconcileError>;
