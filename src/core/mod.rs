//! Core data types.

pub mod manifest;
pub mod source;
pub mod target;

pub use manifest::{FileEntry, ManifestRecord, Meta, OWNED_KEYS};
pub use source::{ModuleReference, SourceComponent};
pub use target::{Distribution, LocatedTarget, ManifestTarget, StyleVariant, TargetShape};
