//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Caviard using clap.

pub mod commands;

use crate::config::{load_config, load_config_str, CaviardConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tokio::sync::watch;

/// Configuration file looked up when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "caviard.toml";

/// Caviard - PII labelling and document redaction pipeline
#[derive(Parser, Debug)]
#[command(name = "caviard")]
#[command(version, about, long_about = None)]
#[command(author = "Caviard Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults to ./caviard.toml when present)
    #[arg(short, long, env = "CAVIARD_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CAVIARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (POST /entry, POST /label, GET /health)
    Serve(commands::serve::ServeArgs),

    /// Label a text and print the entities as JSON
    Label(commands::label::LabelArgs),

    /// Run the full pipeline once for a document
    Redact(commands::redact::RedactArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Load the configuration selected on the command line
///
/// An explicit path must exist. Without one, `caviard.toml` is used when
/// present and built-in defaults (plus environment overrides) otherwise.
pub fn resolve_config(config_path: Option<&str>) -> Result<CaviardConfig> {
    match config_path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            load_config_str("")
        }
    }
}

/// Resolve once `shutdown` flips to `true` (or its sender is dropped)
pub async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow() {
        if shutdown.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["caviard", "serve"]);
        assert!(matches!(cli.command, Commands::Serve(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["caviard", "--config", "custom.toml", "serve"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["caviard", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_label() {
        let cli = Cli::parse_from(["caviard", "label", "--text", "Jean Dupont"]);
        match cli.command {
            Commands::Label(args) => assert_eq!(args.text.as_deref(), Some("Jean Dupont")),
            other => panic!("Expected label, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_redact_with_forbidden_labels() {
        let cli = Cli::parse_from([
            "caviard",
            "redact",
            "/data/cv.pdf",
            "--forbid",
            "PERSON,EMAIL",
            "--forbid",
            "PHONE",
        ]);
        match cli.command {
            Commands::Redact(args) => {
                assert_eq!(args.file_path, "/data/cv.pdf");
                assert_eq!(args.forbid, ["PERSON", "EMAIL", "PHONE"]);
            }
            other => panic!("Expected redact, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["caviard", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["caviard", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_resolve_missing_explicit_config_fails() {
        assert!(resolve_config(Some("/nonexistent/caviard.toml")).is_err());
    }

    #[tokio::test]
    async fn test_wait_for_shutdown() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));
        tx.send(true).unwrap();
        waiter.await.unwrap();
    }
}
