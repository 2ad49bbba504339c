//! The synchronization run.
//!
//! Targets are processed strictly in configured order. A missing target is
//! skipped; a malformed one aborts the run, leaving earlier targets written.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::analysis::{analyze, Analysis, FeatureDetector};
use crate::core::{
    Distribution, LocatedTarget, ManifestRecord, SourceComponent, StyleVariant, TargetShape,
};
use crate::error::SyncError;
use crate::ops::aggregate::update_entry;
use crate::ops::embedded::rewrite_record;
use crate::ops::events::{SyncEvent, TargetStatus};
use crate::ops::merge::{build_record, RecordOptions};
use crate::util::config::SyncConfig;
use crate::util::fs::{read_target, write_target};
use crate::util::shell::{Shell, Status};

/// Why a target was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    AnchorNotFound,
    EntryNotFound,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotFound => "not found",
            SkipReason::AnchorNotFound => "record anchor not found",
            SkipReason::EntryNotFound => "no matching registry entry",
        }
    }
}

/// Result of processing one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOutcome {
    Updated,
    Skipped(SkipReason),
}

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub analysis: Analysis,
    /// Every processed target, the aggregate registry last.
    pub outcomes: Vec<(PathBuf, TargetOutcome)>,
}

impl SyncReport {
    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == TargetOutcome::Updated)
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.updated()
    }

    /// Outcome for a target path, as configured.
    pub fn outcome(&self, path: &Path) -> Option<TargetOutcome> {
        self.outcomes
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, o)| *o)
    }
}

/// Current time as written to `meta.lastUpdated`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Run the synchronizer against a registry root.
pub fn sync(root: &Path, config: &SyncConfig, shell: &Shell) -> Result<SyncReport, SyncError> {
    sync_at(root, config, shell, &timestamp())
}

/// Run the synchronizer with a fixed `lastUpdated` timestamp.
pub fn sync_at(
    root: &Path,
    config: &SyncConfig,
    shell: &Shell,
    last_updated: &str,
) -> Result<SyncReport, SyncError> {
    let detector = FeatureDetector::new(&config.features)?;
    let source = SourceComponent::load(&root.join(&config.component.source))?;

    let analysis = analyze(&source, &config.classifier, &detector);
    report_analysis(shell, &config.component.source, &analysis, &detector);

    let mut outcomes = Vec::with_capacity(config.targets.len() + 1);

    for target in &config.targets {
        let located = target.locate(root);

        let outcome = if !located.exists {
            tracing::warn!("target {} does not exist, skipping", target.path.display());
            TargetOutcome::Skipped(SkipReason::NotFound)
        } else {
            let record = build_record(
                config,
                &analysis,
                RecordOptions {
                    style: target.style(),
                    distribution: target.distribution(&config.registry.public_dir),
                    content: &source.text,
                    last_updated,
                },
            );

            match target.shape {
                TargetShape::StructuredMetadata => update_structured(&located, &record)?,
                TargetShape::EmbeddedRecord => update_embedded(&located, &record)?,
            }
        };

        warn_skip(shell, &target.path, &config.component.name, outcome);
        report_target(shell, &target.path, target.shape, outcome);
        outcomes.push((target.path.clone(), outcome));
    }

    let aggregate = &config.registry.aggregate;
    let outcome = update_aggregate(&root.join(aggregate), config, &analysis)?;
    warn_skip(shell, aggregate, &config.component.name, outcome);
    report_target(shell, aggregate, TargetShape::StructuredMetadata, outcome);
    outcomes.push((aggregate.clone(), outcome));

    Ok(SyncReport { analysis, outcomes })
}

/// Parse an existing JSON manifest. Empty files are empty manifests.
fn parse_manifest(path: &Path, content: &str) -> Result<Map<String, Value>, SyncError> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    let value: Value =
        serde_json::from_str(content).map_err(|source| SyncError::MalformedManifest {
            path: path.to_path_buf(),
            source,
        })?;

    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SyncError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

fn to_pretty_json(map: Map<String, Value>) -> String {
    let mut out = serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default();
    out.push('\n');
    out
}

fn update_structured(
    located: &LocatedTarget,
    record: &ManifestRecord,
) -> Result<TargetOutcome, SyncError> {
    let path = &located.full_path;
    let content = read_target(path)?;
    let mut manifest = parse_manifest(path, &content)?;

    record.merge_into(&mut manifest);
    write_target(path, &to_pretty_json(manifest))?;

    tracing::debug!("merged manifest into {}", path.display());
    Ok(TargetOutcome::Updated)
}

fn update_embedded(
    located: &LocatedTarget,
    record: &ManifestRecord,
) -> Result<TargetOutcome, SyncError> {
    let path = &located.full_path;
    let content = read_target(path)?;

    match rewrite_record(&content, record) {
        Some(updated) => {
            write_target(path, &updated)?;
            tracing::debug!("rewrote embedded record in {}", path.display());
            Ok(TargetOutcome::Updated)
        }
        None => Ok(TargetOutcome::Skipped(SkipReason::AnchorNotFound)),
    }
}

fn update_aggregate(
    path: &Path,
    config: &SyncConfig,
    analysis: &Analysis,
) -> Result<TargetOutcome, SyncError> {
    if !path.is_file() {
        tracing::debug!("aggregate registry {} does not exist", path.display());
        return Ok(TargetOutcome::Skipped(SkipReason::NotFound));
    }

    let content = read_target(path)?;
    let mut registry = parse_manifest(path, &content)?;

    // Only description and dependency fields are taken from the record.
    let record = build_record(
        config,
        analysis,
        RecordOptions {
            style: StyleVariant::NewYork,
            distribution: Distribution::Internal,
            content: "",
            last_updated: "",
        },
    );

    if !update_entry(&mut registry, &record) {
        return Ok(TargetOutcome::Skipped(SkipReason::EntryNotFound));
    }

    write_target(path, &to_pretty_json(registry))?;
    Ok(TargetOutcome::Updated)
}

/// Warn about a target that exists but has nothing to update.
fn warn_skip(shell: &Shell, path: &Path, name: &str, outcome: TargetOutcome) {
    match outcome {
        TargetOutcome::Skipped(SkipReason::AnchorNotFound) => {
            shell.warn(format!("no `name: \"{name}\"` record in {}", path.display()))
        }
        TargetOutcome::Skipped(SkipReason::EntryNotFound) => {
            shell.warn(format!("no item named `{name}` in {}", path.display()))
        }
        _ => {}
    }
}

fn report_analysis(shell: &Shell, source: &Path, analysis: &Analysis, detector: &FeatureDetector) {
    let deps = &analysis.dependencies;

    if shell.is_json() {
        shell.json_event(&SyncEvent::Analysis {
            source: source.to_path_buf(),
            external: deps.external.clone(),
            internal: deps.internal.clone(),
            features: analysis.features.clone(),
        });
        return;
    }

    shell.status(Status::Analyzed, source.display());
    shell.detail(format!("dependencies: {}", deps.external.join(", ")));
    shell.detail(format!("registry dependencies: {}", deps.internal.join(", ")));
    if shell.is_verbose() {
        shell.detail(format!(
            "features: {} detected by {} rules",
            analysis.features.len(),
            detector.rule_count()
        ));
    } else {
        shell.detail(format!("features: {} detected", analysis.features.len()));
    }
}

fn report_target(shell: &Shell, path: &Path, shape: TargetShape, outcome: TargetOutcome) {
    if shell.is_json() {
        let (status, detail) = match outcome {
            TargetOutcome::Updated => (TargetStatus::Updated, None),
            TargetOutcome::Skipped(reason) => (TargetStatus::Skipped, Some(reason.as_str().to_string())),
        };
        shell.json_event(&SyncEvent::Target {
            path: path.to_path_buf(),
            shape,
            status,
            detail,
        });
        return;
    }

    match outcome {
        TargetOutcome::Updated => shell.status(Status::Updated, path.display()),
        TargetOutcome::Skipped(reason) => shell.status(
            Status::Skipped,
            format!("{} ({})", path.display(), reason.as_str()),
        ),
    }
}
