//! Pattern library for the deterministic detectors

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Detector definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct DetectorDefinition {
    /// Short detector name (`email`, `phone`, ...)
    pub name: String,
    /// Label attached to every match
    pub label: String,
    /// Regex pattern
    pub pattern: String,
    /// Only compiled into the active set when explicitly enabled
    #[serde(default)]
    pub opt_in: bool,
}

/// Compiled detector with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Detector name
    pub name: String,
    /// Label attached to every match
    pub label: String,
    /// Compiled regex
    pub regex: Regex,
    /// Whether the detector is opt-in
    pub opt_in: bool,
}

impl CompiledPattern {
    /// Every non-overlapping leftmost match, in source order
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    detectors: Vec<DetectorDefinition>,
}

/// Ordered registry of compiled detectors
///
/// Order is the order of the library file and is preserved by every accessor.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Create a new pattern registry from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read pattern library: {}",
                path.as_ref().display()
            )
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary =
            toml::from_str(content).context("Failed to parse pattern library TOML")?;

        let mut patterns = Vec::with_capacity(library.detectors.len());
        for def in library.detectors {
            if def.label.trim().is_empty() {
                anyhow::bail!("Detector '{}' has an empty label", def.name);
            }

            let regex = Regex::new(&def.pattern).with_context(|| {
                format!("Invalid regex in detector '{}': {}", def.name, def.pattern)
            })?;

            patterns.push(CompiledPattern {
                name: def.name,
                label: def.label,
                regex,
                opt_in: def.opt_in,
            });
        }

        Ok(Self { patterns })
    }

    /// Create a default pattern registry with built-in detectors
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../patterns/detectors.toml");
        Self::from_toml(default_toml)
    }

    /// Get all patterns, opt-in ones included
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Patterns that run for the given opt-in selection, in library order
    pub fn active_patterns<'a>(
        &'a self,
        enabled_opt_in: &'a [String],
    ) -> impl Iterator<Item = &'a CompiledPattern> + 'a {
        self.patterns.iter().filter(move |p| {
            !p.opt_in || enabled_opt_in.iter().any(|name| name == &p.name)
        })
    }

    /// Get the first detector emitting the given label
    pub fn pattern_for_label(&self, label: &str) -> Option<&CompiledPattern> {
        self.patterns.iter().find(|p| p.label == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::labels;

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let names: Vec<&str> = registry
            .all_patterns()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["email", "phone", "address", "age", "date", "card"]);
    }

    #[test]
    fn test_active_patterns_skip_opt_in() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let labels_active: Vec<&str> = registry
            .active_patterns(&[])
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(
            labels_active,
            [
                labels::EMAIL,
                labels::PHONE,
                labels::ADDRESS,
                labels::AGE,
                labels::DATE
            ]
        );

        let enabled = vec!["card".to_string()];
        assert_eq!(registry.active_patterns(&enabled).count(), 6);
    }

    #[test]
    fn test_email_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let email = registry.pattern_for_label(labels::EMAIL).unwrap();
        assert!(email.regex.is_match("test@example.com"));
        assert!(!email.regex.is_match("not-an-email"));
        assert!(!email.regex.is_match("user@host.c"));
    }

    #[test]
    fn test_find_all_is_leftmost_and_ordered() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let email = registry.pattern_for_label(labels::EMAIL).unwrap();
        let found = email.find_all("b@x.org puis a@y.fr");
        assert_eq!(found, ["b@x.org", "a@y.fr"]);
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let toml = r#"
[[detectors]]
name = "broken"
label = "BROKEN"
pattern = "(unclosed"
"#;
        let err = PatternRegistry::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let toml = r#"
[[detectors]]
name = "nolabel"
label = " "
pattern = "x"
"#;
        assert!(PatternRegistry::from_toml(toml).is_err());
    }

    #[test]
    fn test_missing_library_file() {
        assert!(PatternRegistry::from_file("/nonexistent/detectors.toml").is_err());
    }
}
