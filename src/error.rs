//! Error types for a synchronization run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// A fatal error that stops the run.
///
/// A missing target is not an error; it is reported as a skipped
/// [`TargetOutcome`](crate::ops::TargetOutcome).
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("component source not found: {}", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed manifest: {}", path.display())]
    MalformedManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("`{}` does not contain a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid feature pattern `{pattern}`")]
    InvalidFeaturePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl SyncError {
    /// The file the error is about, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            SyncError::MissingSource { path, .. }
            | SyncError::MalformedManifest { path, .. }
            | SyncError::NotAnObject { path }
            | SyncError::Read { path, .. }
            | SyncError::Write { path, .. } => Some(path),
            SyncError::InvalidFeaturePattern { .. } => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.to_string());
        if let Some(path) = self.path() {
            diag = diag.with_location(path);
        }

        match self {
            SyncError::MissingSource { source, .. } => diag
                .with_context(source.to_string())
                .with_suggestion(suggestions::MISSING_SOURCE),
            SyncError::MalformedManifest { source, .. } => diag
                .with_context(format!("line {}, column {}: {}", source.line(), source.column(), source))
                .with_context("no further targets were processed")
                .with_suggestion(suggestions::MALFORMED_MANIFEST),
            SyncError::NotAnObject { .. } => diag
                .with_context("no further targets were processed")
                .with_suggestion(suggestions::MALFORMED_MANIFEST),
            SyncError::Read { source, .. } | SyncError::Write { source, .. } => {
                diag.with_context(source.to_string())
            }
            SyncError::InvalidFeaturePattern { source, .. } => diag
                .with_context(source.to_string())
                .with_suggestion(suggestions::INVALID_PATTERN),
        }
    }
}
