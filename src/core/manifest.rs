//! The manifest record written to every target.

use serde::Serialize;
use serde_json::{Map, Value};

/// Keys owned by the synchronizer. Anything else in a target is left alone.
pub const OWNED_KEYS: [&str; 10] = [
    "$schema",
    "name",
    "type",
    "title",
    "description",
    "registryDependencies",
    "devDependencies",
    "files",
    "categories",
    "meta",
];

/// Canonical metadata for one component.
///
/// `None` fields are not defined for the target being written and are
/// removed from it on merge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestRecord {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: String,
    pub registry_dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub files: Vec<FileEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

/// A file belonging to the component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Extended metadata carried by the public distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub features: Vec<String>,
    pub last_updated: String,
}

impl ManifestRecord {
    /// Convert to a JSON object with undefined fields omitted.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            // A struct of strings and vectors always serializes to an object.
            _ => Map::new(),
        }
    }

    /// Merge into an existing manifest.
    ///
    /// Owned keys are overwritten in place (keeping their position) or
    /// removed when undefined; new keys are appended; foreign keys keep
    /// their values and order.
    pub fn merge_into(&self, existing: &mut Map<String, Value>) {
        let mut fields = self.to_map();

        for key in OWNED_KEYS {
            match fields.remove(key) {
                Some(value) => {
                    existing.insert(key.to_string(), value);
                }
                None => {
                    existing.shift_remove(key);
                }
            }
        }
    }
}
