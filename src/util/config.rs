//! Configuration for a synchronization run.
//!
//! Everything the synchronizer needs to know about the registry layout lives
//! in [`SyncConfig`]. The defaults describe the chat-drawer registry; a
//! `registry-sync.toml` in the registry root overrides any part of it:
//!
//! ```toml
//! [component]
//! name = "chat-drawer"
//! source = "registry/new-york/chat-drawer/chat-drawer.tsx"
//!
//! [[targets]]
//! path = "public/r/chat-drawer.json"
//!
//! [[targets]]
//! path = "registry/index.ts"
//! shape = "embedded-record"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::{default_rules, Classifier, FeatureRuleSpec};
use crate::core::{ManifestTarget, StyleVariant};

/// File name of the project configuration.
pub const CONFIG_FILE: &str = "registry-sync.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// The component being synchronized
    pub component: ComponentConfig,

    /// Registry-wide locations and constants
    pub registry: RegistryConfig,

    /// Target files, processed in order
    pub targets: Vec<ManifestTarget>,

    /// Dependency classification rules
    pub classifier: Classifier,

    /// Description text
    pub description: DescriptionConfig,

    /// Feature detection rule table
    pub features: Vec<FeatureRuleSpec>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            component: ComponentConfig::default(),
            registry: RegistryConfig::default(),
            targets: vec![
                ManifestTarget::structured("public/r/chat-drawer.json"),
                ManifestTarget::structured("api/registry/chat-drawer.json"),
                ManifestTarget::structured("registry/default/chat-drawer/index.json"),
                ManifestTarget::structured("registry/new-york/chat-drawer/index.json"),
                ManifestTarget::structured("chat-drawer.json"),
                ManifestTarget::embedded("registry/index.ts"),
            ],
            classifier: Classifier::default(),
            description: DescriptionConfig::default(),
            features: default_rules(),
        }
    }
}

/// The component described by the manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Registry item name; also the anchor of the embedded record
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Registry item type, also used for file entries
    #[serde(rename = "type")]
    pub item_type: String,

    /// Canonical source, relative to the registry root
    pub source: PathBuf,

    /// Path of the component file for a style. `{style}` and `{name}` are
    /// substituted.
    pub file_pattern: String,

    /// Categories listed in the public distribution
    pub categories: Vec<String>,
}

impl Default for ComponentConfig {
    fn default() -> Self {
        ComponentConfig {
            name: "chat-drawer".to_string(),
            title: "Chat Drawer".to_string(),
            item_type: "registry:component".to_string(),
            source: PathBuf::from("registry/new-york/chat-drawer/chat-drawer.tsx"),
            file_pattern: "registry/{style}/{name}/{name}.tsx".to_string(),
            categories: vec!["chat".to_string(), "drawer".to_string(), "ai".to_string()],
        }
    }
}

impl ComponentConfig {
    /// File path recorded in the manifest for a style.
    pub fn file_path(&self, style: StyleVariant) -> String {
        self.file_pattern
            .replace("{style}", style.as_str())
            .replace("{name}", &self.name)
    }
}

/// Registry-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory holding the public distribution
    pub public_dir: PathBuf,

    /// `$schema` written to public manifests
    pub schema_url: String,

    /// Aggregate registry listing every item
    pub aggregate: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            public_dir: PathBuf::from("public/r"),
            schema_url: "https://ui.shadcn.com/schema/registry-item.json".to_string(),
            aggregate: PathBuf::from("registry.json"),
        }
    }
}

/// Fixed parts of the generated description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionConfig {
    pub base: String,
    pub suffix: String,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        DescriptionConfig {
            base: "A reusable global drawer chat component with AI integration".to_string(),
            suffix: " and responsive design.".to_string(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load the configuration for a registry root.
    ///
    /// An explicit path must exist. Otherwise `registry-sync.toml` in the
    /// root is used when present, and the defaults when not.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            return Self::load(path);
        }

        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!("using config {}", path.display());
            Self::load(&path)
        } else {
            tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, root.display());
            Ok(Self::default())
        }
    }
}
