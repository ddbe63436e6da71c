//! Domain models for relwatch.
//!
//! - `ManagedRelease` / `Request`: the controlled object and the pass wrapping it
//! - `Condition`: generation-stamped status signals
//! - `Snapshot`: persisted history of release versions
//! - `ReleaseObservation`: a single observed store write

pub mod condition;
pub mod error;
pub mod object;
pub mod observation;
pub mod snapshot;

pub use condition::{Condition, ConditionStatus, ConditionType, Conditions};
pub use error::{ReconcileError, Result};
pub use object::{
    ManagedRelease, ManagedReleaseSpec, ManagedReleaseStatus, ObjectMeta, Request, TestSpec,
    DEFAULT_MAX_HISTORY,
};
pub use observation::ReleaseObservation;
pub use snapshot::{test_hooks_from_release, Snapshot, Snapshots, TestHookStatus, TestHooks};
