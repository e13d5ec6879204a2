//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Caviard configuration file.

use crate::cli::resolve_config;
use crate::labelling::stopwords::StopwordSet;
use crate::labelling::RecognizerKind;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let shown_path = config_path.unwrap_or(crate::cli::DEFAULT_CONFIG_PATH);
        tracing::info!(config_path = %shown_path, "Validating configuration");

        println!("🔍 Validating configuration file: {shown_path}");
        println!();

        // Loading runs validation
        let config = match resolve_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Entry Address: {}", config.server.entry_addr);
        println!("  Extraction Service: {}", config.services.extraction_url);
        println!("  Redaction Service: {}", config.services.redaction_url);
        match config.services.labelling_url {
            Some(ref url) => println!("  Labelling: remote ({url})"),
            None => println!("  Labelling: in-process"),
        }
        println!("  Timeout: {}s", config.services.timeout_seconds);
        println!("  Locale: {}", config.labelling.locale);

        let recognizer = match config.labelling.recognizer.kind {
            RecognizerKind::Heuristic => "heuristic".to_string(),
            RecognizerKind::None => "none".to_string(),
            RecognizerKind::Remote => format!(
                "remote ({})",
                config.labelling.recognizer.url.as_deref().unwrap_or("-")
            ),
        };
        println!("  Recognizer: {recognizer}");
        println!("  Merge Overlaps: {}", config.labelling.merge_overlaps);
        println!("  Card Numbers: {}", config.labelling.detect_card_numbers);

        // A missing list only degrades filtering, so this is a warning
        match StopwordSet::try_load(&config.labelling.stopwords_dir, &config.labelling.locale)
            .await
        {
            Ok(set) => println!("  Stopwords: {} words", set.len()),
            Err(e) => println!("  ⚠️  Stopwords: {e}"),
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("caviard.toml");
        std::fs::write(&path, "[application]\nlog_level = \"loud\"\n").unwrap();

        let code = ValidateArgs {}
            .execute(Some(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("caviard.toml");
        std::fs::write(&path, "[labelling]\nlocale = \"fr\"\n").unwrap();

        let code = ValidateArgs {}
            .execute(Some(path.to_str().unwrap()))
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
