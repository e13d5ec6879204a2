//! Configuration schema types
//!
//! This module defines the configuration structure for Caviard.

use crate::labelling::config::LabellingConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Main Caviard configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; an empty file yields a working local setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaviardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Collaborator service locations and timeouts
    #[serde(default)]
    pub services: ServicesConfig,

    /// Labelling engine settings
    #[serde(default)]
    pub labelling: LabellingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CaviardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.services.validate()?;
        self.labelling.validate().map_err(|e| format!("{e:#}"))?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listening address of the entry endpoint
    #[serde(default = "default_entry_addr")]
    pub entry_addr: String,

    /// Origins allowed by CORS (empty allows any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        for origin in &self.cors_origins {
            url::Url::parse(origin)
                .map_err(|e| format!("Invalid server.cors_origins entry '{origin}': {e}"))?;
        }
        Ok(())
    }

    /// Parsed listening address
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.entry_addr
            .parse()
            .map_err(|e| format!("Invalid server.entry_addr '{}': {e}", self.entry_addr))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            entry_addr: default_entry_addr(),
            cors_origins: Vec::new(),
        }
    }
}

/// Collaborator services configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Base URL of the extraction service
    #[serde(default = "default_extraction_url")]
    pub extraction_url: String,

    /// Base URL of the redaction service
    #[serde(default = "default_redaction_url")]
    pub redaction_url: String,

    /// Base URL of a remote labelling service (in-process engine when unset)
    #[serde(default)]
    pub labelling_url: Option<String>,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
}

impl ServicesConfig {
    fn validate(&self) -> Result<(), String> {
        validate_url("services.extraction_url", &self.extraction_url)?;
        validate_url("services.redaction_url", &self.redaction_url)?;
        if let Some(ref url) = self.labelling_url {
            validate_url("services.labelling_url", url)?;
        }

        if self.timeout_seconds == 0 {
            return Err("services.timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("services.connect_timeout_seconds must be > 0".to_string());
        }
        if self.connect_timeout_seconds > self.timeout_seconds {
            return Err(
                "services.connect_timeout_seconds cannot exceed services.timeout_seconds"
                    .to_string(),
            );
        }
        Ok(())
    }

    /// Per-call timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Connection timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            extraction_url: default_extraction_url(),
            redaction_url: default_redaction_url(),
            labelling_url: None,
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), String> {
    let url = url::Url::parse(value).map_err(|e| format!("Invalid {field} '{value}': {e}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("{field} must use http or https, got '{}'", url.scheme()));
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_entry_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_extraction_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_redaction_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
