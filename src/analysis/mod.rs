//! Lexical analysis of a component's source.
//!
//! Nothing here type-checks or fully parses the source; it only finds import
//! statements and matches capability patterns.

pub mod deps;
pub mod features;
pub mod imports;
pub mod lexer;

pub use deps::{Classifier, DependencyKind, DependencySet};
pub use features::{default_rules, FeatureDetector, FeatureRuleSpec, DEFAULT_FEATURES};
pub use imports::extract_imports;

use serde::Serialize;

use crate::core::source::{ModuleReference, SourceComponent};

/// Everything derived from one source component.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    pub references: Vec<ModuleReference>,
    pub dependencies: DependencySet,
    pub features: Vec<String>,
}

/// Run the extractor, classifier and feature detector over a component.
pub fn analyze(
    source: &SourceComponent,
    classifier: &Classifier,
    detector: &FeatureDetector,
) -> Analysis {
    let references = extract_imports(&source.text);
    tracing::debug!(
        "found {} import statements in {}",
        references.len(),
        source.path.display()
    );

    let dependencies = classifier.classify(&references);
    let features = detector.detect(&source.text);

    Analysis {
        references,
        dependencies,
        features,
    }
}
