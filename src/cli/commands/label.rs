//! Label command implementation
//!
//! Labels a text file, `--text`, or standard input with the configured
//! engine and prints `{extracted_text, entities}` as JSON.

use crate::cli::resolve_config;
use crate::domain::LabelResponse;
use crate::labelling::LabellingEngine;
use anyhow::Context;
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Arguments for the label command
#[derive(Args, Debug)]
pub struct LabelArgs {
    /// Text file to label (reads stdin when neither a file nor --text is given)
    pub file: Option<PathBuf>,

    /// Label this text instead of a file
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Override the stopword locale
    #[arg(long)]
    pub locale: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl LabelArgs {
    /// Execute the label command
    pub async fn execute(&self, config_path: Option<&str>) -> anyhow::Result<i32> {
        let mut config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        if let Some(locale) = &self.locale {
            config.labelling.locale = locale.clone();
        }

        let text = self.read_input()?;
        let engine = LabellingEngine::from_config(&config.labelling, config.services.timeout())?;

        let entities = match engine.label(&text).await {
            Ok(entities) => entities,
            Err(e) => {
                tracing::error!(error = %e, "Labelling failed");
                eprintln!("❌ Labelling failed: {e}");
                return Ok(1);
            }
        };

        let response = LabelResponse {
            extracted_text: text,
            entities,
        };
        let output = if self.pretty {
            serde_json::to_string_pretty(&response)?
        } else {
            serde_json::to_string(&response)?
        };
        println!("{output}");
        Ok(0)
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read standard input")?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_prefers_text() {
        let args = LabelArgs {
            file: None,
            text: Some("bonjour".to_string()),
            locale: None,
            pretty: false,
        };
        assert_eq!(args.read_input().unwrap(), "bonjour");
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Contact: jane@example.com").unwrap();
        let args = LabelArgs {
            file: Some(file.path().to_path_buf()),
            text: None,
            locale: None,
            pretty: true,
        };
        assert_eq!(args.read_input().unwrap(), "Contact: jane@example.com");
    }

    #[test]
    fn test_read_input_missing_file() {
        let args = LabelArgs {
            file: Some(PathBuf::from("/nonexistent/input.txt")),
            text: None,
            locale: None,
            pretty: false,
        };
        assert!(args.read_input().is_err());
    }
}
