//! Events for `--message-format json`.
//!
//! Each event is serialized as a single JSON object per line on stdout,
//! tagged by `reason`.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::TargetShape;

/// Status of a processed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetStatus {
    Updated,
    Skipped,
}

/// An event emitted during a run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum SyncEvent {
    /// The component source was analyzed.
    Analysis {
        source: PathBuf,
        external: Vec<String>,
        internal: Vec<String>,
        features: Vec<String>,
    },

    /// A target was processed.
    Target {
        path: PathBuf,
        shape: TargetShape,
        status: TargetStatus,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },

    /// The run completed. An aborted run ends with [`SyncEvent::Error`].
    Finished {
        updated: usize,
        skipped: usize,
        duration_ms: u64,
    },

    /// A fatal error; the last event of an aborted run.
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        path: Option<PathBuf>,
    },
}

impl SyncEvent {
    /// Serialize this event to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_serialization() {
        let event = SyncEvent::Target {
            path: PathBuf::from("public/r/chat-drawer.json"),
            shape: TargetShape::StructuredMetadata,
            status: TargetStatus::Skipped,
            detail: Some("not found".into()),
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"target\""));
        assert!(json.contains("\"shape\":\"structured-metadata\""));
        assert!(json.contains("\"status\":\"skipped\""));
        assert!(json.contains("\"detail\":\"not found\""));
    }

    #[test]
    fn test_finished_serialization() {
        let event = SyncEvent::Finished {
            updated: 4,
            skipped: 2,
            duration_ms: 12,
        };
        let json = event.to_json();
        assert!(json.contains("\"reason\":\"finished\""));
        assert!(json.contains("\"updated\":4"));
    }

    #[test]
    fn test_error_without_path() {
        let json = SyncEvent::Error {
            message: "boom".into(),
            path: None,
        }
        .to_json();
        assert_eq!(json, r#"{"reason":"error","message":"boom"}"#);
    }
}
