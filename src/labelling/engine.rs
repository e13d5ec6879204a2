//! Entity labelling engine
//!
//! This module provides the [`LabellingEngine`] that turns raw text into the
//! filtered entity list handed to redaction.
//!
//! # Algorithm
//!
//! 1. Run the recognizer and keep its entities as-is
//! 2. Append every detector's matches, in library order
//! 3. Load the locale's stopword list and relabel noise as `STOPWORD`
//! 4. Drop every `STOPWORD` entity
//! 5. Optionally merge duplicate and contained entities
//!
//! Only a recognizer failure aborts labelling; it happens before any
//! detector runs. Entities are never filtered by the caller's forbidden
//! labels here, that is the redaction stage's job.
//!
//! # Examples
//!
//! ```no_run
//! use caviard::labelling::{config::LabellingConfig, LabellingEngine};
//! use caviard::labelling::recognizer::NoopRecognizer;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let engine = LabellingEngine::new(&LabellingConfig::default(), Arc::new(NoopRecognizer))?;
//! let entities = engine.label("Contact: jane@example.com").await?;
//! assert_eq!(entities[0].label, "EMAIL");
//! # Ok(())
//! # }
//! ```

use crate::domain::{labels, CaviardError, Entity, LabellingError};
use crate::labelling::{
    config::LabellingConfig,
    detector::{patterns::PatternRegistry, regex::RegexDetector, Detector},
    overlap,
    recognizer::{self, Recognizer},
    stopwords::{self, StopwordSet},
    Labeller,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Entity labelling engine
///
/// Holds no per-request state: the stopword list is re-read on every call,
/// so one engine can be shared across tasks behind an `Arc`.
pub struct LabellingEngine {
    recognizer: Arc<dyn Recognizer>,
    detector: Arc<dyn Detector>,
    stopwords_dir: PathBuf,
    locale: String,
    merge_overlaps: bool,
}

impl LabellingEngine {
    /// Create a new labelling engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pattern
    /// library cannot be loaded.
    pub fn new(config: &LabellingConfig, recognizer: Arc<dyn Recognizer>) -> Result<Self> {
        config
            .validate()
            .context("Invalid labelling configuration")?;

        let mut detector = if let Some(ref pattern_path) = config.pattern_library {
            RegexDetector::with_registry(PatternRegistry::from_file(pattern_path)?)
        } else {
            RegexDetector::new()?
        };
        for name in config.enabled_opt_in_detectors() {
            detector = detector.with_opt_in(name);
        }

        Ok(Self {
            recognizer,
            detector: Arc::new(detector),
            stopwords_dir: config.stopwords_dir.clone(),
            locale: config.locale.clone(),
            merge_overlaps: config.merge_overlaps,
        })
    }

    /// Create an engine with the recognizer selected by configuration
    ///
    /// `timeout` bounds calls to a remote recognizer.
    pub fn from_config(
        config: &LabellingConfig,
        timeout: Duration,
    ) -> crate::domain::Result<Self> {
        let recognizer = recognizer::from_config(&config.recognizer, timeout)?;
        Self::new(config, recognizer).map_err(|e| CaviardError::Configuration(format!("{e:#}")))
    }

    /// Replace the detector set
    pub fn with_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detector = detector;
        self
    }

    /// Label free text
    ///
    /// # Errors
    ///
    /// Returns [`LabellingError::RecognizerFailure`] (or
    /// [`LabellingError::Remote`] for a remote recognizer) when the recognizer
    /// cannot process the text.
    pub async fn label(&self, text: &str) -> std::result::Result<Vec<Entity>, LabellingError> {
        let start = Instant::now();

        let mut entities = self.recognizer.recognize(text).await?;
        let recognized = entities.len();

        entities.extend(self.detector.detect(text));
        let detected = entities.len() - recognized;

        let stopword_set = StopwordSet::load(&self.stopwords_dir, &self.locale).await;
        let mut entities: Vec<Entity> = stopwords::refine(entities, &stopword_set)
            .into_iter()
            .filter(|e| e.label != labels::STOPWORD)
            .collect();

        if self.merge_overlaps {
            entities = overlap::merge_overlaps(entities);
        }

        tracing::debug!(
            recognizer = self.recognizer.name(),
            recognized = recognized,
            detected = detected,
            entity_count = entities.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Labelled text"
        );

        Ok(entities)
    }
}

#[async_trait]
impl Labeller for LabellingEngine {
    async fn label(&self, text: &str) -> std::result::Result<Vec<Entity>, LabellingError> {
        LabellingEngine::label(self, text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelling::recognizer::{FixedRecognizer, NoopRecognizer};
    use std::fs;
    use tempfile::TempDir;

    fn config_with_stopwords(words: &str) -> (TempDir, LabellingConfig) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fr_stopwords.txt"), words).unwrap();
        let config = LabellingConfig {
            stopwords_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        (dir, config)
    }

    #[tokio::test]
    async fn test_recognizer_entities_come_first() {
        let (_dir, config) = config_with_stopwords("le\n");
        let recognizer = FixedRecognizer::new(vec![Entity::new("Marie", labels::PERSON)]);
        let engine = LabellingEngine::new(&config, Arc::new(recognizer)).unwrap();

        let entities = engine.label("Marie: marie@example.fr").await.unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("Marie", labels::PERSON),
                Entity::new("marie@example.fr", labels::EMAIL),
            ]
        );
    }

    #[tokio::test]
    async fn test_stopword_entities_are_removed() {
        let (_dir, config) = config_with_stopwords("le\nla\n");
        let recognizer = FixedRecognizer::new(vec![
            Entity::new("Le", labels::PERSON),
            Entity::new("Dupont", labels::PERSON),
        ]);
        let engine = LabellingEngine::new(&config, Arc::new(recognizer)).unwrap();

        let entities = engine.label("Le Dupont").await.unwrap();
        assert_eq!(entities, vec![Entity::new("Dupont", labels::PERSON)]);
    }

    #[tokio::test]
    async fn test_missing_stopwords_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = LabellingConfig {
            stopwords_dir: dir.path().join("absent"),
            ..Default::default()
        };
        let recognizer = FixedRecognizer::new(vec![Entity::new("Le", labels::PERSON)]);
        let engine = LabellingEngine::new(&config, Arc::new(recognizer)).unwrap();

        let entities = engine.label("Le").await.unwrap();
        assert_eq!(entities, vec![Entity::new("Le", labels::PERSON)]);
    }

    #[tokio::test]
    async fn test_recognizer_failure_aborts() {
        let (_dir, config) = config_with_stopwords("");
        let engine = LabellingEngine::new(
            &config,
            Arc::new(FixedRecognizer::failing("invalid encoding")),
        )
        .unwrap();

        let err = engine.label("jane@example.com").await.unwrap_err();
        assert!(matches!(err, LabellingError::RecognizerFailure(_)));
    }

    #[tokio::test]
    async fn test_duplicates_kept_unless_merging() {
        let (_dir, mut config) = config_with_stopwords("");
        let recognizer = || {
            Arc::new(FixedRecognizer::new(vec![Entity::new(
                "jane@example.com",
                labels::EMAIL,
            )]))
        };

        let engine = LabellingEngine::new(&config, recognizer()).unwrap();
        let entities = engine.label("jane@example.com").await.unwrap();
        assert_eq!(entities.len(), 2);

        config.merge_overlaps = true;
        let engine = LabellingEngine::new(&config, recognizer()).unwrap();
        let entities = engine.label("jane@example.com").await.unwrap();
        assert_eq!(entities, vec![Entity::new("jane@example.com", labels::EMAIL)]);
    }

    #[tokio::test]
    async fn test_custom_detector() {
        struct Fixed;
        impl Detector for Fixed {
            fn detect(&self, _text: &str) -> Vec<Entity> {
                vec![Entity::new("X", "CUSTOM")]
            }
            fn labels(&self) -> Vec<&str> {
                vec!["CUSTOM"]
            }
        }

        let (_dir, config) = config_with_stopwords("");
        let engine = LabellingEngine::new(&config, Arc::new(NoopRecognizer))
            .unwrap()
            .with_detector(Arc::new(Fixed));
        assert_eq!(
            engine.label("anything").await.unwrap(),
            vec![Entity::new("X", "CUSTOM")]
        );
    }
}
