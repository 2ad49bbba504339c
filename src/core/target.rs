//! Manifest targets: the files kept in sync with the component source.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// How a target stores the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetShape {
    /// The whole file is a JSON manifest.
    #[default]
    StructuredMetadata,
    /// A record literal inside a larger source file.
    EmbeddedRecord,
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetShape::StructuredMetadata => write!(f, "structured-metadata"),
            TargetShape::EmbeddedRecord => write!(f, "embedded-record"),
        }
    }
}

/// Which copy of the component a target describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleVariant {
    NewYork,
    Default,
}

impl StyleVariant {
    /// Directory name of the style under `registry/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleVariant::NewYork => "new-york",
            StyleVariant::Default => "default",
        }
    }
}

/// Whether a target is the public distribution of the component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Served to consumers; carries schema, inline content and metadata.
    Public,
    Internal,
}

/// A configured target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTarget {
    /// Path relative to the registry root.
    pub path: PathBuf,
    #[serde(default)]
    pub shape: TargetShape,
}

impl ManifestTarget {
    pub fn structured(path: impl Into<PathBuf>) -> Self {
        ManifestTarget {
            path: path.into(),
            shape: TargetShape::StructuredMetadata,
        }
    }

    pub fn embedded(path: impl Into<PathBuf>) -> Self {
        ManifestTarget {
            path: path.into(),
            shape: TargetShape::EmbeddedRecord,
        }
    }

    /// A target belongs to the `default` style when one of its path
    /// segments is `default`.
    pub fn style(&self) -> StyleVariant {
        let is_default = self
            .path
            .components()
            .any(|c| matches!(c, Component::Normal(s) if s == StyleVariant::Default.as_str()));

        if is_default {
            StyleVariant::Default
        } else {
            StyleVariant::NewYork
        }
    }

    /// A target is public when it lives under `public_dir`. `.` segments
    /// are ignored on both sides.
    pub fn distribution(&self, public_dir: &Path) -> Distribution {
        if without_cur_dir(&self.path).starts_with(without_cur_dir(public_dir)) {
            Distribution::Public
        } else {
            Distribution::Internal
        }
    }

    /// Resolve against the registry root and check for existence.
    pub fn locate(&self, root: &Path) -> LocatedTarget {
        let full_path = root.join(&self.path);
        let exists = full_path.is_file();
        LocatedTarget {
            target: self.clone(),
            full_path,
            exists,
        }
    }
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// A target resolved on disk.
#[derive(Debug, Clone)]
pub struct LocatedTarget {
    pub target: ManifestTarget,
    pub full_path: PathBuf,
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_style_from_path_segment() {
        assert_eq!(
            ManifestTarget::structured("registry/default/chat-drawer/index.json").style(),
            StyleVariant::Default
        );
        assert_eq!(
            ManifestTarget::structured("registry/new-york/chat-drawer/index.json").style(),
            StyleVariant::NewYork
        );
        // Substrings do not count.
        assert_eq!(
            ManifestTarget::structured("defaults/chat-drawer.json").style(),
            StyleVariant::NewYork
        );
    }

    #[test]
    fn test_distribution() {
        let public_dir = Path::new("public/r");
        assert_eq!(
            ManifestTarget::structured("public/r/chat-drawer.json").distribution(public_dir),
            Distribution::Public
        );
        assert_eq!(
            ManifestTarget::structured("api/registry/chat-drawer.json").distribution(public_dir),
            Distribution::Internal
        );
    }

    #[test]
    fn test_distribution_ignores_cur_dir() {
        assert_eq!(
            ManifestTarget::structured("./public/r/chat-drawer.json")
                .distribution(Path::new("public/r")),
            Distribution::Public
        );
        assert_eq!(
            ManifestTarget::structured("public/./r/chat-drawer.json")
                .distribution(Path::new("./public/r")),
            Distribution::Public
        );
        assert_eq!(
            ManifestTarget::structured("./public/rr/chat-drawer.json")
                .distribution(Path::new("public/r")),
            Distribution::Internal
        );
    }

    #[test]
    fn test_shape_serde() {
        let target: ManifestTarget =
            toml::from_str("path = \"registry/index.ts\"\nshape = \"embedded-record\"").unwrap();
        assert_eq!(target, ManifestTarget::embedded("registry/index.ts"));

        let target: ManifestTarget = toml::from_str("path = \"chat-drawer.json\"").unwrap();
        assert_eq!(target.shape, TargetShape::StructuredMetadata);
    }

    #[test]
    fn test_locate() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("present.json"), "{}").unwrap();

        assert!(ManifestTarget::structured("present.json").locate(tmp.path()).exists);
        assert!(!ManifestTarget::structured("absent.json").locate(tmp.path()).exists);
    }
}
