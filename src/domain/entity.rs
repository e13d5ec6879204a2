//! Entity model shared by every stage of the pipeline
//!
//! An [`Entity`] is a `(text, label)` pair. Labels form an open set: the
//! recognizer contributes its own categories verbatim, detectors contribute the
//! fixed categories in [`labels`], and [`labels::STOPWORD`] marks entities that
//! must be dropped before anything leaves the labelling stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed label values produced by the pattern detectors and the stopword filter
pub mod labels {
    /// Email addresses
    pub const EMAIL: &str = "EMAIL";
    /// Telephone numbers
    pub const PHONE: &str = "PHONE";
    /// Postal addresses
    pub const ADDRESS: &str = "ADDRESS";
    /// Ages ("42 ans")
    pub const AGE: &str = "AGE";
    /// Numeric dates
    pub const DATE: &str = "DATE";
    /// Payment card numbers (opt-in detector)
    pub const CARD: &str = "CARD";
    /// Person names (recognizer)
    pub const PERSON: &str = "PERSON";
    /// Organisations (recognizer)
    pub const ORGANIZATION: &str = "ORGANIZATION";
    /// Geopolitical entities (recognizer)
    pub const GPE: &str = "GPE";
    /// Internal suppression marker, never present in labelling output
    pub const STOPWORD: &str = "STOPWORD";
}

/// A detected piece of content and its category
///
/// Entities are compared field by field; the pipeline never deduplicates them
/// unless overlap merging is explicitly enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Literal text span as it appears in the document
    pub text: String,
    /// Category label
    pub label: String,
}

impl Entity {
    /// Create a new entity
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }

    /// Return a copy of this entity carrying a different label
    pub fn relabelled(&self, label: impl Into<String>) -> Self {
        Self {
            text: self.text.clone(),
            label: label.into(),
        }
    }

    /// Whether this entity carries the suppression marker
    pub fn is_stopword(&self) -> bool {
        self.label == labels::STOPWORD
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.label)
    }
}

/// Wrap literal matches into entities carrying a single label
pub fn entities_from_matches<I, S>(matches: I, label: &str) -> Vec<Entity>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    matches
        .into_iter()
        .map(|text| Entity::new(text, label))
        .collect()
}
