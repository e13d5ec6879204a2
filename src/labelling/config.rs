//! Labelling configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Which recognizer implementation backs the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecognizerKind {
    /// In-process capitalisation heuristic
    #[default]
    Heuristic,
    /// External NER model service
    Remote,
    /// No recognizer (detectors only)
    None,
}

/// Recognizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Implementation
    #[serde(default)]
    pub kind: RecognizerKind,

    /// Endpoint of the NER service (required for `remote`)
    #[serde(default)]
    pub url: Option<String>,

    /// Label renames applied to recognizer output
    #[serde(default = "default_label_map")]
    pub label_map: HashMap<String, String>,
}

/// Default recognizer label renames (`PER` -> `PERSON`, `LOC` -> `GPE`)
pub fn default_label_map() -> HashMap<String, String> {
    HashMap::from([
        ("PER".to_string(), "PERSON".to_string()),
        ("LOC".to_string(), "GPE".to_string()),
    ])
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            kind: RecognizerKind::default(),
            url: None,
            label_map: default_label_map(),
        }
    }
}

/// Labelling engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabellingConfig {
    /// Locale selecting the stopword list (`fr`, `en`, `fr_FR.UTF-8`, ...)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Directory holding `<locale>_stopwords.txt` files
    #[serde(default = "default_stopwords_dir")]
    pub stopwords_dir: PathBuf,

    /// Path to a custom detector library TOML file
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Collapse duplicate and contained entities before returning
    #[serde(default)]
    pub merge_overlaps: bool,

    /// Run the opt-in payment card detector
    #[serde(default)]
    pub detect_card_numbers: bool,

    /// Recognizer settings
    #[serde(default)]
    pub recognizer: RecognizerConfig,
}

fn default_locale() -> String {
    "fr".to_string()
}

fn default_stopwords_dir() -> PathBuf {
    PathBuf::from("stopwords")
}

impl Default for LabellingConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            stopwords_dir: default_stopwords_dir(),
            pattern_library: None,
            merge_overlaps: false,
            detect_card_numbers: false,
            recognizer: RecognizerConfig::default(),
        }
    }
}

impl LabellingConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.locale.trim().is_empty() {
            anyhow::bail!("labelling.locale cannot be empty");
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        if self.recognizer.kind == RecognizerKind::Remote {
            let url = self
                .recognizer
                .url
                .as_deref()
                .context("labelling.recognizer.url is required when kind = 'remote'")?;
            url::Url::parse(url)
                .with_context(|| format!("Invalid labelling.recognizer.url: {url}"))?;
        }

        Ok(())
    }

    /// Names of the opt-in detectors this configuration enables
    pub fn enabled_opt_in_detectors(&self) -> Vec<String> {
        let mut enabled = Vec::new();
        if self.detect_card_numbers {
            enabled.push("card".to_string());
        }
        enabled
    }
}
