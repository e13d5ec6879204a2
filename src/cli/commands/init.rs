//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "caviard.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Caviard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your service addresses", self.output);
                println!("  2. Validate configuration: caviard validate-config");
                println!("  3. Start the server: caviard serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Caviard Configuration File
# PII labelling and document redaction pipeline

[application]
log_level = "info"

[server]
entry_addr = "127.0.0.1:8080"

[services]
extraction_url = "http://127.0.0.1:8081"
redaction_url = "http://127.0.0.1:5000"
timeout_seconds = 120

[labelling]
locale = "fr"
stopwords_dir = "stopwords"

[labelling.recognizer]
kind = "heuristic"

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Caviard Configuration File
# PII labelling and document redaction pipeline
#
# Values may reference environment variables with ${VAR_NAME}, and any key
# can be overridden with CAVIARD_<SECTION>_<KEY> (e.g. CAVIARD_LABELLING_LOCALE).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
log_level = "info"

# ============================================================================
# HTTP Server
# ============================================================================
[server]
# Address of POST /entry, POST /label and GET /health
entry_addr = "127.0.0.1:8080"

# Origins allowed by CORS (empty = any origin)
cors_origins = ["http://localhost:8080"]

# ============================================================================
# Collaborator Services
# ============================================================================
[services]
# Extraction service (POST /extract {file_path} -> {text})
extraction_url = "http://127.0.0.1:8081"

# Redaction service (POST /anonymize {file_path, entities, forbidden_labels})
redaction_url = "http://127.0.0.1:5000"

# Remote labelling service (POST /label); unset = label in-process
# labelling_url = "http://127.0.0.1:8082"

# Per-call timeout and connection timeout, in seconds
timeout_seconds = 120
connect_timeout_seconds = 10

# ============================================================================
# Labelling
# ============================================================================
[labelling]
# Locale selecting <stopwords_dir>/<locale>_stopwords.txt
# (taken from LANG when omitted; fr_FR.UTF-8 falls back to fr)
locale = "fr"
stopwords_dir = "stopwords"

# Custom detector library (TOML [[detectors]] entries, in output order)
# pattern_library = "patterns/detectors.toml"

# Collapse identical and contained entities (duplicates are kept by default)
merge_overlaps = false

# Also detect payment card numbers (label CARD)
detect_card_numbers = false

[labelling.recognizer]
# heuristic | remote | none
kind = "heuristic"

# NER model service, required when kind = "remote"
# url = "http://127.0.0.1:5001/ner"

# Renames applied to recognizer labels
# label_map = { PER = "PERSON", LOC = "GPE" }

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;

    #[test]
    fn test_generated_configs_are_valid() {
        for content in [
            InitArgs::generate_minimal_config(),
            InitArgs::generate_config_with_examples(),
        ] {
            let config = load_config_str(&content).unwrap();
            assert_eq!(config.labelling.locale, "fr");
        }
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("caviard.toml");
        std::fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[services]"));
    }
}
