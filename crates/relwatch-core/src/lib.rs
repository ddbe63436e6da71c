//! Relwatch Core Library
//!
//! Release observation and status aggregation for a release reconciliation
//! controller. One pass over a managed release looks like:
//!
//! 1. The action executor writes to an [`ObservingStore`] whose observer,
//!    built by [`observe_release`], collects every write into
//!    [`ObservedReleases`].
//! 2. [`ObservedReleases::record_on_object`] folds the writes into the
//!    object's history.
//! 3. [`summarize`] recomputes the `Ready` condition.
//!
//! Everything here is in-memory; persisting the object is up to the caller.
//!
//! [`ObservingStore`]: relwatch_store::ObservingStore

pub mod config;
pub mod domain;
pub mod event;
pub mod log_buffer;
pub mod obs;
pub mod observed;
pub mod summarize;
pub mod telemetry;
pub mod verify;

pub use config::EngineConfig;
pub use domain::{
    test_hooks_from_release, Condition, ConditionStatus, ConditionType, Conditions,
    ManagedRelease, ManagedReleaseSpec, ManagedReleaseStatus, ObjectMeta, ReconcileError,
    ReleaseObservation, Request, Result, Snapshot, Snapshots, TestHookStatus, TestHooks,
    TestSpec, DEFAULT_MAX_HISTORY,
};
pub use event::{
    event_message_with_log, event_meta, event_meta_for_group, event_meta_group_key,
    EventMetadata, EVENT_META_GROUP, LOG_HEADER,
};
pub use log_buffer::{LogBuffer, DEFAULT_LOG_BUFFER_SIZE};
pub use obs::{
    emit_history_recorded, emit_ready_summarized, emit_release_mismatch, emit_release_observed,
    emit_remediation_cleared, emit_snapshot_replaced, ReleaseSpan,
};
pub use observed::{observe_release, ObservedReleases, SharedObservedReleases};
pub use summarize::{conditionally_delete_remediated, summarize, summary_conditions};
pub use telemetry::{init_tracing, LogFormat};
pub use verify::{verify_latest, verify_release_targets};

/// Relwatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
