//! Locale-specific stopword filter
//!
//! Stopword lists are newline-delimited files named
//! `<locale>_stopwords.txt`. They are read fresh on every load, through
//! `tokio::fs` so the runtime is never blocked, and concurrent requests never
//! share mutable state.

use crate::domain::{labels, Entity, StopwordError};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Set of lowercase words flagged as non-sensitive noise
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Build a set from raw words (trimmed and lower-cased, blanks skipped)
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| {
                let trimmed = w.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
            })
            .collect();
        Self { words }
    }

    /// Parse newline-delimited word list content
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    /// Load the word list for `locale` from `dir`
    ///
    /// A missing or unreadable resource is logged and yields an empty set.
    pub async fn load(dir: &Path, locale: &str) -> Self {
        match Self::try_load(dir, locale).await {
            Ok(set) => {
                tracing::debug!(locale = %locale, words = set.len(), "Loaded stopwords");
                set
            }
            Err(e) => {
                tracing::warn!(
                    locale = %locale,
                    error = %e,
                    "Unable to load stopwords, continuing with an empty set"
                );
                Self::default()
            }
        }
    }

    /// Load the word list for `locale`, reporting a missing resource
    ///
    /// The exact locale file is tried first; a locale such as `fr_FR.UTF-8`
    /// then falls back to its language code (`fr`).
    pub async fn try_load(dir: &Path, locale: &str) -> Result<Self, StopwordError> {
        let exact = resource_path(dir, locale);
        match fs::read_to_string(&exact).await {
            Ok(content) => return Ok(Self::parse(&content)),
            Err(e) => {
                let language = language_code(locale);
                if language == locale {
                    return Err(StopwordError::ResourceMissing {
                        path: exact,
                        source: e,
                    });
                }
            }
        }

        let fallback = resource_path(dir, &language_code(locale));
        fs::read_to_string(&fallback)
            .await
            .map(|content| Self::parse(&content))
            .map_err(|source| StopwordError::ResourceMissing {
                path: fallback,
                source,
            })
    }

    /// Whether `word` (case-insensitive) is a stopword
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words in the set
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Relabel entities whose lower-cased text is a stopword as [`labels::STOPWORD`]
///
/// This is a per-element map: order and length are preserved.
pub fn refine(entities: Vec<Entity>, stopwords: &StopwordSet) -> Vec<Entity> {
    if stopwords.is_empty() {
        return entities;
    }

    entities
        .into_iter()
        .map(|entity| {
            if stopwords.contains(&entity.text) {
                entity.relabelled(labels::STOPWORD)
            } else {
                entity
            }
        })
        .collect()
}

/// Path of the word list for a locale
pub fn resource_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{locale}_stopwords.txt"))
}

/// Language part of a POSIX-style locale (`fr_FR.UTF-8` -> `fr`)
fn language_code(locale: &str) -> String {
    locale
        .split(['_', '.', '-', '@'])
        .next()
        .unwrap_or(locale)
        .to_lowercase()
}
