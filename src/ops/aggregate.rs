//! Refreshing the component's entry in the aggregate registry.

use serde_json::{Map, Value};

use crate::core::ManifestRecord;

/// Keys of an aggregate entry refreshed from the record.
pub const AGGREGATE_KEYS: [&str; 3] = ["description", "registryDependencies", "devDependencies"];

/// Update the entry named like the record inside `registry.items`.
///
/// Returns `false` when there is no such entry; the registry is then left
/// untouched. Sibling entries and all other keys are never modified.
pub fn update_entry(registry: &mut Map<String, Value>, record: &ManifestRecord) -> bool {
    let Some(Value::Array(items)) = registry.get_mut("items") else {
        return false;
    };

    let entry = items.iter_mut().find_map(|item| match item {
        Value::Object(obj) if obj.get("name").and_then(Value::as_str) == Some(record.name.as_str()) => {
            Some(obj)
        }
        _ => None,
    });

    let Some(entry) = entry else {
        return false;
    };

    let mut fields = record.to_map();
    for key in AGGREGATE_KEYS {
        if let Some(value) = fields.remove(key) {
            entry.insert(key.to_string(), value);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FileEntry;
    use serde_json::json;

    fn record() -> ManifestRecord {
        ManifestRecord {
            schema: None,
            name: "chat-drawer".into(),
            item_type: "registry:component".into(),
            title: "Chat Drawer".into(),
            description: "New description.".into(),
            registry_dependencies: vec!["button".into()],
            dev_dependencies: vec!["ai".into()],
            files: vec![FileEntry {
                path: "x.tsx".into(),
                file_type: "registry:component".into(),
                content: None,
            }],
            categories: None,
            meta: None,
        }
    }

    #[test]
    fn test_updates_matching_entry_only() {
        let mut registry = json!({
            "name": "open-chat-front",
            "items": [
                { "name": "other", "description": "keep me" },
                {
                    "name": "chat-drawer",
                    "title": "Custom Title",
                    "description": "old",
                    "registryDependencies": [],
                    "files": [{ "path": "custom.tsx" }]
                }
            ]
        })
        .as_object()
        .unwrap()
        .clone();

        assert!(update_entry(&mut registry, &record()));

        assert_eq!(registry["items"][0], json!({ "name": "other", "description": "keep me" }));
        let entry = &registry["items"][1];
        assert_eq!(entry["description"], "New description.");
        assert_eq!(entry["registryDependencies"], json!(["button"]));
        assert_eq!(entry["devDependencies"], json!(["ai"]));
        assert_eq!(entry["title"], "Custom Title");
        assert_eq!(entry["files"], json!([{ "path": "custom.tsx" }]));

        let keys: Vec<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["name", "title", "description", "registryDependencies", "files", "devDependencies"]
        );
    }

    #[test]
    fn test_no_matching_entry() {
        let original = json!({ "items": [{ "name": "other" }] });
        let mut registry = original.as_object().unwrap().clone();

        assert!(!update_entry(&mut registry, &record()));
        assert_eq!(Value::Object(registry), original);
    }

    #[test]
    fn test_missing_items() {
        let mut registry = Map::new();
        assert!(!update_entry(&mut registry, &record()));
    }
}
