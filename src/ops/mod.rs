//! High-level operations.
//!
//! This module builds manifest records and writes them into targets.

pub mod aggregate;
pub mod embedded;
pub mod events;
pub mod merge;
pub mod sync;

pub use events::{SyncEvent, TargetStatus};
pub use merge::{build_record, describe, RecordOptions};
pub use sync::{sync, sync_at, timestamp, SkipReason, SyncReport, TargetOutcome};
