//! In-process heuristic recognizer
//!
//! Finds runs of capitalised words (optionally joined by lowercase name
//! particles such as `de` or `van`) and labels them `PERSON`, or
//! `ORGANIZATION` when the run ends with a legal-form suffix. Leading
//! honorifics are dropped from the span. Sentence-initial capitals are
//! recognised too; the stopword filter is what removes them downstream.

use super::Recognizer;
use crate::domain::{labels, Entity, LabellingError};
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

const CAPITALISED_RUN: &str = r"\b\p{Lu}[\p{L}'’\-]*(?:[ \t]+(?:(?:de|du|des|la|le|van|von|der|di|da)[ \t]+)?\p{Lu}[\p{L}'’\-]*)*";

const TITLES: &[&str] = &[
    "monsieur",
    "madame",
    "mademoiselle",
    "docteur",
    "maître",
    "maitre",
    "professeur",
    "mme",
    "mlle",
    "mr",
    "mrs",
    "ms",
    "dr",
    "pr",
];

const ORGANIZATION_SUFFIXES: &[&str] = &[
    "SA", "SAS", "SASU", "SARL", "SNC", "EURL", "Inc", "Ltd", "LLC", "GmbH", "Corp", "AG",
];

/// Deterministic capitalisation-based recognizer
#[derive(Debug, Clone)]
pub struct HeuristicRecognizer {
    run: Regex,
}

impl HeuristicRecognizer {
    /// Create a new heuristic recognizer
    pub fn new() -> Result<Self> {
        Ok(Self {
            run: Regex::new(CAPITALISED_RUN)?,
        })
    }

    fn recognize_runs(&self, text: &str) -> Vec<Entity> {
        self.run
            .find_iter(text)
            .filter_map(|m| classify_run(m.as_str()))
            .collect()
    }
}

/// Turn a raw capitalised run into an entity, or drop it
fn classify_run(run: &str) -> Option<Entity> {
    let span = strip_title(run);

    if span.chars().count() < 2 {
        return None;
    }

    let last_word = span.split_whitespace().last().unwrap_or(span);
    let label = if ORGANIZATION_SUFFIXES.contains(&last_word) && span != last_word {
        labels::ORGANIZATION
    } else {
        labels::PERSON
    };

    Some(Entity::new(span, label))
}

/// Drop a leading honorific, keeping the literal remainder of the run
fn strip_title(run: &str) -> &str {
    let Some((first, rest)) = run.split_once(char::is_whitespace) else {
        return if TITLES.contains(&run.to_lowercase().as_str()) {
            ""
        } else {
            run
        };
    };

    if TITLES.contains(&first.to_lowercase().as_str()) {
        rest.trim_start()
    } else {
        run
    }
}

/// Reject input the recognizer cannot have been given intact
fn check_encoding(text: &str) -> Result<(), LabellingError> {
    if let Some(pos) = text.find(['\u{FFFD}', '\0']) {
        return Err(LabellingError::RecognizerFailure(format!(
            "malformed encoding at byte {pos}"
        )));
    }
    Ok(())
}

#[async_trait]
impl Recognizer for HeuristicRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, LabellingError> {
        check_encoding(text)?;
        Ok(self.recognize_runs(text))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
