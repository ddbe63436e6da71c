//! Relwatch-Store: the release store seam for relwatch
//!
//! The release store is an append-only, version-keyed backend that records
//! every release write. This crate owns its record model and the trait the
//! action executor talks to. The concrete backend lives elsewhere.
//!
//! ## Key Components
//!
//! - `Release`: one versioned write of a named release
//! - `ReleaseStore`: async storage trait (create/update/get/last/history)
//! - `ObservingStore`: decorator that reports every successful write to
//!   registered observers
//! - `fakes::MemoryReleaseStore`: in-memory store for tests

mod error;
pub mod fakes;
pub mod observer;
pub mod release;
pub mod storage_traits;

pub use error::StoreError;
pub use observer::{ObserveFn, ObservingStore};
pub use release::{
    ChartMetadata, Hook, HookEvent, HookExecution, HookPhase, Release, ReleaseInfo, ReleaseStatus,
};
pub use storage_traits::{ReleaseStore, StoreResult};
