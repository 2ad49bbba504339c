//! registry-sync - keeps component registry manifests in sync with their source
//!
//! The canonical component source is analyzed lexically for its imports and
//! capabilities, and the resulting metadata is merged into every configured
//! manifest target without disturbing fields the tool does not own.

pub mod analysis;
pub mod core;
pub mod error;
pub mod ops;
pub mod util;

pub use analysis::{Analysis, Classifier, DependencySet, FeatureDetector};
pub use crate::core::{ManifestRecord, ManifestTarget, SourceComponent};
pub use error::SyncError;
pub use ops::{sync, SyncReport, TargetOutcome};
pub use util::config::SyncConfig;
