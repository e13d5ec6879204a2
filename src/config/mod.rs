//! Configuration management for Caviard.
//!
//! # Overview
//!
//! Caviard uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CAVIARD_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use caviard::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("caviard.toml")?;
//! println!("Extraction: {}", config.services.extraction_url);
//! println!("Locale: {}", config.labelling.locale);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ServerConfig`] - Listening address and CORS origins
//! - [`ServicesConfig`] - Extraction / redaction / labelling service URLs and timeouts
//! - [`LabellingConfig`] - Locale, stopwords, detectors and recognizer
//! - [`LoggingConfig`] - Local log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! entry_addr = "127.0.0.1:8080"
//!
//! [services]
//! extraction_url = "${EXTRACTION_URL}"
//! redaction_url = "http://127.0.0.1:5000"
//!
//! [labelling]
//! locale = "fr"
//!
//! [labelling.recognizer]
//! kind = "heuristic"
//! ```

pub mod loader;
pub mod schema;

pub use crate::labelling::config::{LabellingConfig, RecognizerConfig, RecognizerKind};
pub use loader::{load_config, load_config_str};
pub use schema::{ApplicationConfig, CaviardConfig, LoggingConfig, ServerConfig, ServicesConfig};
