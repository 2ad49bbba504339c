//! Capability detection.
//!
//! This is a heuristic: each rule is a case-insensitive regular expression
//! tested against the whole source text. A match says nothing about whether
//! the capability works, only that the source looks like it has it.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Tags reported when no rule matches.
pub const DEFAULT_FEATURES: [&str; 2] = ["basic interface", "container/drawer component"];

/// A (pattern, tag) pair as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRuleSpec {
    pub pattern: String,
    pub tag: String,
}

impl FeatureRuleSpec {
    pub fn new(pattern: impl Into<String>, tag: impl Into<String>) -> Self {
        FeatureRuleSpec {
            pattern: pattern.into(),
            tag: tag.into(),
        }
    }
}

/// The built-in rule table.
pub fn default_rules() -> Vec<FeatureRuleSpec> {
    vec![
        FeatureRuleSpec::new(r"useEffect.*scroll", "Auto-scrolling messages"),
        FeatureRuleSpec::new(r"Loader2.*animate-spin", "Loading states with animations"),
        FeatureRuleSpec::new(r"DrawerClose", "Close button with smooth transitions"),
        FeatureRuleSpec::new(r"useChat", "AI chat integration"),
        FeatureRuleSpec::new(r"responsive|sm:|md:|lg:", "Responsive design"),
        FeatureRuleSpec::new(r"bottomRef.*scrollIntoView", "Auto-scrolling messages"),
        FeatureRuleSpec::new(r"isLoading.*typing", "Loading states with animations"),
        FeatureRuleSpec::new(r"useRef", "Auto-scrolling messages"),
        FeatureRuleSpec::new(r"X.*from.*lucide", "Close button with smooth transitions"),
    ]
}

#[derive(Debug, Clone)]
struct FeatureRule {
    pattern: Regex,
    tag: String,
}

/// Compiled rule table.
#[derive(Debug, Clone)]
pub struct FeatureDetector {
    rules: Vec<FeatureRule>,
}

impl FeatureDetector {
    /// Compile a rule table.
    pub fn new(specs: &[FeatureRuleSpec]) -> Result<Self, SyncError> {
        let rules = specs
            .iter()
            .map(|spec| {
                let pattern = RegexBuilder::new(&spec.pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SyncError::InvalidFeaturePattern {
                        pattern: spec.pattern.clone(),
                        source,
                    })?;
                Ok(FeatureRule {
                    pattern,
                    tag: spec.tag.clone(),
                })
            })
            .collect::<Result<Vec<_>, SyncError>>()?;

        Ok(FeatureDetector { rules })
    }

    /// Number of rules in the table.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Detect features, in rule-table order.
    pub fn detect(&self, src: &str) -> Vec<String> {
        let mut features: Vec<String> = Vec::new();

        for rule in &self.rules {
            if features.contains(&rule.tag) {
                continue;
            }
            if rule.pattern.is_match(src) {
                tracing::debug!("feature `{}` matched /{}/", rule.tag, rule.pattern);
                features.push(rule.tag.clone());
            }
        }

        if features.is_empty() {
            features.extend(DEFAULT_FEATURES.iter().map(|s| s.to_string()));
        }

        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> FeatureDetector {
        FeatureDetector::new(&default_rules()).unwrap()
    }

    #[test]
    fn test_rule_count() {
        assert_eq!(detector().rule_count(), default_rules().len());
        assert_eq!(FeatureDetector::new(&[]).unwrap().rule_count(), 0);
    }

    #[test]
    fn test_order_follows_rule_table() {
        // useChat appears before DrawerClose in the text, but the table
        // lists DrawerClose first.
        let src = "const c = useChat();\n<DrawerClose />";
        assert_eq!(
            detector().detect(src),
            vec!["Close button with smooth transitions", "AI chat integration"]
        );
    }

    #[test]
    fn test_tags_are_deduplicated() {
        let src = "useRef(null); bottomRef.current?.scrollIntoView(); useRef();";
        assert_eq!(detector().detect(src), vec!["Auto-scrolling messages"]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(detector().detect("USECHAT"), vec!["AI chat integration"]);
    }

    #[test]
    fn test_dot_does_not_cross_lines() {
        // `Loader2.*animate-spin` must match on a single line.
        let src = "<Loader2 />\n<div className=\"animate-spin\" />";
        assert!(!detector()
            .detect(src)
            .contains(&"Loading states with animations".to_string()));
    }

    #[test]
    fn test_default_when_nothing_matches() {
        assert_eq!(
            detector().detect("plain text"),
            vec!["basic interface", "container/drawer component"]
        );
    }

    #[test]
    fn test_invalid_pattern() {
        let err = FeatureDetector::new(&[FeatureRuleSpec::new("(unclosed", "Broken")]).unwrap_err();
        assert!(matches!(err, SyncError::InvalidFeaturePattern { .. }));
    }

    #[test]
    fn test_full_component() {
        let src = r#"
import { useEffect, useRef } from "react";
import { useChat } from "@ai-sdk/react";
import { DrawerClose } from "@/components/ui/drawer";
import { Loader2, X } from "lucide-react";

useEffect(() => { bottomRef.current?.scrollIntoView({ behavior: "smooth" }); }, [m]);
<Loader2 className="h-4 w-4 animate-spin" />
<div className="sm:max-w-md" />
"#;
        assert_eq!(
            detector().detect(src),
            vec![
                "Auto-scrolling messages",
                "Loading states with animations",
                "Close button with smooth transitions",
                "AI chat integration",
                "Responsive design",
            ]
        );
    }
}
