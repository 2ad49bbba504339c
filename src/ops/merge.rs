//! Building the canonical manifest record.
//!
//! Pure functions: no I/O, no clock. The timestamp is passed in.

use crate::analysis::Analysis;
use crate::core::{Distribution, FileEntry, ManifestRecord, Meta, StyleVariant};
use crate::util::config::{DescriptionConfig, SyncConfig};

/// Generate the description sentence.
///
/// The first three features are listed, lowercased.
pub fn describe(features: &[String], text: &DescriptionConfig) -> String {
    let mut description = text.base.clone();

    if !features.is_empty() {
        let listed = features
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
            .to_lowercase();
        description.push_str(". Features ");
        description.push_str(&listed);
    }

    description.push_str(&text.suffix);
    description
}

/// Inputs for [`build_record`] that vary per target.
#[derive(Debug, Clone, Copy)]
pub struct RecordOptions<'a> {
    pub style: StyleVariant,
    pub distribution: Distribution,
    /// Component source text, embedded in public manifests
    pub content: &'a str,
    /// RFC 3339 timestamp for `meta.lastUpdated`
    pub last_updated: &'a str,
}

/// Assemble the manifest record for one target.
pub fn build_record(config: &SyncConfig, analysis: &Analysis, opts: RecordOptions<'_>) -> ManifestRecord {
    let component = &config.component;
    let public = opts.distribution == Distribution::Public;

    ManifestRecord {
        schema: public.then(|| config.registry.schema_url.clone()),
        name: component.name.clone(),
        item_type: component.item_type.clone(),
        title: component.title.clone(),
        description: describe(&analysis.features, &config.description),
        registry_dependencies: analysis.dependencies.internal.clone(),
        dev_dependencies: analysis.dependencies.external.clone(),
        files: vec![FileEntry {
            path: component.file_path(opts.style),
            file_type: component.item_type.clone(),
            content: public.then(|| opts.content.to_string()),
        }],
        categories: public.then(|| component.categories.clone()),
        meta: public.then(|| Meta {
            features: analysis.features.clone(),
            last_updated: opts.last_updated.to_string(),
        }),
    }
}
