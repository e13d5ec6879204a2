//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CaviardConfig;
use crate::domain::errors::CaviardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CaviardConfig
/// 4. Takes the labelling locale from `LANG` when the file leaves it unset
/// 5. Applies environment variable overrides (CAVIARD_* prefix)
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use caviard::config::loader::load_config;
///
/// let config = load_config("caviard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CaviardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CaviardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CaviardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] without the file read.
pub fn load_config_str(contents: &str) -> Result<CaviardConfig> {
    let contents = substitute_env_vars(contents)?;

    let raw: toml::Table = toml::from_str(&contents)
        .map_err(|e| CaviardError::Configuration(format!("Failed to parse TOML: {}", e)))?;
    let locale_set = raw
        .get("labelling")
        .and_then(|section| section.get("locale"))
        .is_some();

    let mut config: CaviardConfig = toml::from_str(&contents)
        .map_err(|e| CaviardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    if !locale_set {
        if let Some(locale) = locale_from_lang() {
            config.labelling.locale = locale;
        }
    }

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CaviardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Locale from `LANG`, ignoring the `C` / `POSIX` placeholders
fn locale_from_lang() -> Option<String> {
    std::env::var("LANG")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != "C" && v != "POSIX" && !v.starts_with("C."))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CaviardError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        // Comments are left untouched
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(CaviardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using CAVIARD_* prefix
///
/// Environment variables follow the pattern: CAVIARD_<SECTION>_<KEY>
/// For example: CAVIARD_SERVICES_EXTRACTION_URL, CAVIARD_LABELLING_LOCALE
fn apply_env_overrides(config: &mut CaviardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CAVIARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Server overrides
    if let Ok(val) = std::env::var("CAVIARD_SERVER_ENTRY_ADDR") {
        config.server.entry_addr = val;
    }
    if let Ok(val) = std::env::var("CAVIARD_SERVER_CORS_ORIGINS") {
        config.server.cors_origins = val
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
    }

    // Services overrides
    if let Ok(val) = std::env::var("CAVIARD_SERVICES_EXTRACTION_URL") {
        config.services.extraction_url = val;
    }
    if let Ok(val) = std::env::var("CAVIARD_SERVICES_REDACTION_URL") {
        config.services.redaction_url = val;
    }
    if let Ok(val) = std::env::var("CAVIARD_SERVICES_LABELLING_URL") {
        config.services.labelling_url = (!val.is_empty()).then_some(val);
    }
    if let Ok(val) = std::env::var("CAVIARD_SERVICES_TIMEOUT_SECONDS") {
        config.services.timeout_seconds = parse_override("CAVIARD_SERVICES_TIMEOUT_SECONDS", &val)?;
    }
    if let Ok(val) = std::env::var("CAVIARD_SERVICES_CONNECT_TIMEOUT_SECONDS") {
        config.services.connect_timeout_seconds =
            parse_override("CAVIARD_SERVICES_CONNECT_TIMEOUT_SECONDS", &val)?;
    }

    // Labelling overrides
    if let Ok(val) = std::env::var("CAVIARD_LABELLING_LOCALE") {
        config.labelling.locale = val;
    }
    if let Ok(val) = std::env::var("CAVIARD_LABELLING_STOPWORDS_DIR") {
        config.labelling.stopwords_dir = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("CAVIARD_LABELLING_MERGE_OVERLAPS") {
        config.labelling.merge_overlaps = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CAVIARD_LABELLING_DETECT_CARD_NUMBERS") {
        config.labelling.detect_card_numbers = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CAVIARD_LABELLING_RECOGNIZER_URL") {
        config.labelling.recognizer.url = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CAVIARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CAVIARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_override(name: &str, value: &str) -> Result<u64> {
    value.parse().map_err(|e| {
        CaviardError::Configuration(format!("Invalid value '{value}' for {name}: {e}"))
    })
}
