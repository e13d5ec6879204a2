//! Regex-based detector set

use super::{patterns::PatternRegistry, Detector};
use crate::domain::{entities_from_matches, Entity};
use anyhow::Result;
use std::sync::Arc;

/// Regex-based detector set
///
/// Runs every active pattern over the text in registry order. Opt-in patterns
/// (such as `card`) run only when named in `enabled_opt_in`.
#[derive(Debug, Clone)]
pub struct RegexDetector {
    pattern_registry: Arc<PatternRegistry>,
    enabled_opt_in: Vec<String>,
}

impl RegexDetector {
    /// Create a new regex detector with the built-in library
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new regex detector with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
            enabled_opt_in: Vec::new(),
        }
    }

    /// Enable an opt-in detector by name
    pub fn with_opt_in(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.enabled_opt_in.contains(&name) {
            self.enabled_opt_in.push(name);
        }
        self
    }
}

impl Detector for RegexDetector {
    fn detect(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for pattern in self.pattern_registry.active_patterns(&self.enabled_opt_in) {
            let matches = pattern.find_all(text);
            if !matches.is_empty() {
                tracing::trace!(
                    detector = %pattern.name,
                    count = matches.len(),
                    "Detector matched"
                );
            }
            entities.extend(entities_from_matches(matches, &pattern.label));
        }

        entities
    }

    fn labels(&self) -> Vec<&str> {
        self.pattern_registry
            .active_patterns(&self.enabled_opt_in)
            .map(|p| p.label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::labels;
    use test_case::test_case;

    fn detect_label(text: &str, label: &str) -> Vec<String> {
        RegexDetector::new()
            .unwrap()
            .detect(text)
            .into_iter()
            .filter(|e| e.label == label)
            .map(|e| e.text)
            .collect()
    }

    #[test_case("Contact: john.doe@example.com", "john.doe@example.com" ; "plain")]
    #[test_case("mail: a.b-c+tag@sous.domaine.fr.", "a.b-c+tag@sous.domaine.fr" ; "subdomain")]
    fn test_detect_email(text: &str, expected: &str) {
        assert_eq!(detect_label(text, labels::EMAIL), [expected]);
    }

    #[test_case("Appelez le +33 6 12 34 56 78", "+33 6 12 34 56 78" ; "international")]
    #[test_case("tel 01-23-45-67-89 merci", "01-23-45-67-89" ; "hyphenated")]
    #[test_case("(01) 23 45 67 89", "01) 23 45 67 89" ; "parenthesised")]
    fn test_detect_phone(text: &str, expected: &str) {
        assert_eq!(detect_label(text, labels::PHONE), [expected]);
    }

    #[test]
    fn test_short_number_is_not_a_phone() {
        assert!(detect_label("code 1234", labels::PHONE).is_empty());
    }

    #[test]
    fn test_detect_address() {
        assert_eq!(
            detect_label("12 rue de la Paix", labels::ADDRESS),
            ["12 rue de la Paix"]
        );
        assert_eq!(
            detect_label("au 3 allée des Chênes-Verts, Lyon", labels::ADDRESS),
            ["3 allée des Chênes-Verts"]
        );
    }

    #[test_case("12 Rue de la Paix" ; "capitalised keyword")]
    #[test_case("12 RUE DE LA PAIX" ; "upper case keyword")]
    fn test_street_keyword_is_case_sensitive(text: &str) {
        assert!(detect_label(text, labels::ADDRESS).is_empty());
    }

    #[test_case("Il a 42 ans.", "42 ans" ; "plural")]
    #[test_case("un enfant de 1 an", "1 an" ; "singular")]
    #[test_case("agé de 30ans", "30ans" ; "no space")]
    fn test_detect_age(text: &str, expected: &str) {
        assert_eq!(detect_label(text, labels::AGE), [expected]);
    }

    #[test]
    fn test_age_requires_whole_word() {
        assert!(detect_label("42 anneaux", labels::AGE).is_empty());
    }

    #[test_case("né le 12/03/1985", "12/03/1985" ; "slashes")]
    #[test_case("le 1-2-24", "1-2-24" ; "short year")]
    #[test_case("émis 2024-03-12", "2024-03-12" ; "iso")]
    fn test_detect_date(text: &str, expected: &str) {
        assert_eq!(detect_label(text, labels::DATE), [expected]);
    }

    #[test]
    fn test_detector_order_is_fixed() {
        let detector = RegexDetector::new().unwrap();
        let text = "né le 12/03/1985, 42 ans, 12 rue de la Paix, +33 6 12 34 56 78, jane@example.com";
        let found: Vec<String> = detector.detect(text).into_iter().map(|e| e.label).collect();
        assert_eq!(
            found,
            [labels::EMAIL, labels::PHONE, labels::ADDRESS, labels::AGE, labels::DATE]
        );
    }

    #[test]
    fn test_same_literal_keeps_every_label_in_detector_order() {
        let detector = RegexDetector::new().unwrap();
        assert_eq!(
            detector.detect("émis 2024-03-12"),
            vec![
                Entity::new("2024-03-12", labels::PHONE),
                Entity::new("2024-03-12", labels::DATE),
            ]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let detector = RegexDetector::new().unwrap();
        assert!(detector.detect("rien à signaler ici").is_empty());
        assert!(detector.detect("").is_empty());
    }

    #[test]
    fn test_card_detector_is_opt_in() {
        let text = "carte 4970 1012 3456 7890";
        let detector = RegexDetector::new().unwrap();
        assert!(detector.detect(text).iter().all(|e| e.label != labels::CARD));

        let detector = RegexDetector::new().unwrap().with_opt_in("card");
        assert!(detector.detect(text).iter().any(|e| e.label == labels::CARD));
        assert_eq!(detector.labels().last(), Some(&labels::CARD));
    }
}
