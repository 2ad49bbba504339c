//! Classification of module references into dependency sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::source::ModuleReference;

/// Default alias prefix under which the UI library's components live.
pub const DEFAULT_INTERNAL_PREFIX: &str = "@/components/ui/";

/// Rules for sorting specifiers into internal, external and local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Classifier {
    /// Prefix marking a component of this project's UI library.
    pub internal_prefix: String,

    /// Prefixes of references that resolve inside the project and are
    /// neither internal components nor packages.
    pub local_prefixes: Vec<String>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier {
            internal_prefix: DEFAULT_INTERNAL_PREFIX.to_string(),
            local_prefixes: vec![".".to_string(), "@/".to_string()],
        }
    }
}

/// External and internal dependencies of a component.
///
/// Both lists are deduplicated and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    pub external: Vec<String>,
    pub internal: Vec<String>,
}

/// How a single specifier was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyKind {
    Internal(String),
    External(String),
    Local,
}

impl Classifier {
    /// Classify a single specifier.
    pub fn classify_specifier(&self, specifier: &str) -> DependencyKind {
        if let Some(component) = specifier.strip_prefix(self.internal_prefix.as_str()) {
            if component.is_empty() {
                return DependencyKind::Local;
            }
            return DependencyKind::Internal(component.to_string());
        }

        if self
            .local_prefixes
            .iter()
            .any(|prefix| specifier.starts_with(prefix.as_str()))
        {
            return DependencyKind::Local;
        }

        match package_id(specifier) {
            Some(id) => DependencyKind::External(id),
            None => DependencyKind::Local,
        }
    }

    /// Split references into dependency sets.
    pub fn classify(&self, refs: &[ModuleReference]) -> DependencySet {
        let mut external = BTreeSet::new();
        let mut internal = BTreeSet::new();

        for reference in refs {
            match self.classify_specifier(&reference.specifier) {
                DependencyKind::Internal(id) => {
                    internal.insert(id);
                }
                DependencyKind::External(id) => {
                    external.insert(id);
                }
                DependencyKind::Local => {
                    tracing::trace!("ignoring local reference `{}`", reference.specifier);
                }
            }
        }

        DependencySet {
            external: external.into_iter().collect(),
            internal: internal.into_iter().collect(),
        }
    }
}

/// Package id of a bare specifier: `@scope/name` for scoped packages,
/// otherwise the first path segment.
fn package_id(specifier: &str) -> Option<String> {
    let mut segments = specifier.split('/');
    let first = segments.next().filter(|s| !s.is_empty())?;

    if first.starts_with('@') {
        let name = segments.next().filter(|s| !s.is_empty())?;
        Some(format!("{}/{}", first, name))
    } else {
        Some(first.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(specifiers: &[&str]) -> Vec<ModuleReference> {
        specifiers
            .iter()
            .map(|s| ModuleReference {
                statement: format!("import x from \"{}\"", s),
                specifier: s.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_mixed_references() {
        let deps = Classifier::default().classify(&refs(&[
            "@/components/ui/X",
            "pkgB",
            "@scopeC/pkgD",
            "./localE",
        ]));

        assert_eq!(deps.internal, vec!["X"]);
        assert_eq!(deps.external, vec!["@scopeC/pkgD", "pkgB"]);
    }

    #[test]
    fn test_dedup_and_sort() {
        let deps = Classifier::default().classify(&refs(&[
            "react",
            "@/components/ui/input",
            "react/jsx-runtime",
            "@/components/ui/button",
            "@ai-sdk/react",
            "@/components/ui/input",
            "ai",
        ]));

        assert_eq!(deps.internal, vec!["button", "input"]);
        assert_eq!(deps.external, vec!["@ai-sdk/react", "ai", "react"]);
    }

    #[test]
    fn test_subpath_of_scoped_package() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify_specifier("@radix-ui/react-dialog/dist/index"),
            DependencyKind::External("@radix-ui/react-dialog".into())
        );
        assert_eq!(classifier.classify_specifier("@lonely"), DependencyKind::Local);
    }

    #[test]
    fn test_project_alias_is_local() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify_specifier("@/lib/utils"), DependencyKind::Local);
        assert_eq!(classifier.classify_specifier("../sibling"), DependencyKind::Local);
    }

    #[test]
    fn test_custom_internal_prefix() {
        let classifier = Classifier {
            internal_prefix: "~/ui/".into(),
            local_prefixes: vec![".".into(), "~/".into()],
        };
        assert_eq!(
            classifier.classify_specifier("~/ui/dialog"),
            DependencyKind::Internal("dialog".into())
        );
        assert_eq!(classifier.classify_specifier("~/hooks/x"), DependencyKind::Local);
    }
}
