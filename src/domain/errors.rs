//! Domain error types
//!
//! This module defines the error hierarchy for Caviard. Errors never expose
//! third-party HTTP client types; transport failures are flattened into
//! [`CollaboratorError`] with the service they came from.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main Caviard error type
///
/// Used for startup, configuration and CLI paths. Request handling uses the
/// narrower [`PipelineError`] so that exactly one stage failure is reported.
#[derive(Debug, Error)]
pub enum CaviardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Orchestration failures
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Labelling failures outside of an orchestration
    #[error("Labelling error: {0}")]
    Labelling(#[from] LabellingError),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Calling the Extraction collaborator
    Extracting,
    /// Running the entity labelling engine (in process or remote)
    Labelling,
    /// Calling the Redaction collaborator
    Redacting,
}

impl Stage {
    /// Stable lowercase name used in logs and error payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracting => "extracting",
            Self::Labelling => "labelling",
            Self::Redacting => "redacting",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while talking to an external collaborator service
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Transport-level failure (connection refused, DNS, reset)
    #[error("{service} service unavailable: {message}")]
    Unavailable {
        /// Collaborator name
        service: &'static str,
        /// Transport error description
        message: String,
    },

    /// Non-success HTTP status
    #[error("{service} service returned status {status}: {body}")]
    Rejected {
        /// Collaborator name
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, verbatim
        body: String,
    },

    /// Success status with a body that does not match the contract
    #[error("{service} service returned an invalid response: {message}")]
    InvalidResponse {
        /// Collaborator name
        service: &'static str,
        /// Decoding error description
        message: String,
    },

    /// No response within the configured timeout
    #[error("{service} service did not respond within {timeout_secs}s")]
    Timeout {
        /// Collaborator name
        service: &'static str,
        /// Timeout that elapsed
        timeout_secs: u64,
    },
}

impl CollaboratorError {
    /// Name of the collaborator that failed
    pub fn service(&self) -> &'static str {
        match self {
            Self::Unavailable { service, .. }
            | Self::Rejected { service, .. }
            | Self::InvalidResponse { service, .. }
            | Self::Timeout { service, .. } => service,
        }
    }
}

/// Errors raised by the labelling stage
#[derive(Debug, Error)]
pub enum LabellingError {
    /// The statistical recognizer could not process the text
    #[error("Recognizer failure: {0}")]
    RecognizerFailure(String),

    /// Labelling was delegated to a remote service that failed
    #[error(transparent)]
    Remote(#[from] CollaboratorError),
}

/// Errors raised while loading a stopword resource
///
/// Never surfaced to callers of the pipeline: the filter degrades to an empty
/// set and the condition is logged.
#[derive(Debug, Error)]
pub enum StopwordError {
    /// The word list is absent or unreadable
    #[error("Stopword resource missing: {}: {source}", path.display())]
    ResourceMissing {
        /// Path that was tried
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// A failed orchestration, naming the stage and cause
///
/// A request either completes Extract → Label → Redact or produces exactly one
/// of these.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The inbound request could not be understood
    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    /// The Extraction collaborator failed
    #[error("Extraction failed: {0}")]
    Extraction(#[source] CollaboratorError),

    /// Labelling failed
    #[error("Labelling failed: {0}")]
    Labelling(#[source] LabellingError),

    /// The Redaction collaborator failed
    #[error("Redaction failed: {0}")]
    Redaction(#[source] CollaboratorError),
}

impl PipelineError {
    /// Stage at which the pipeline halted, if it started at all
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::MalformedRequest(_) => None,
            Self::Extraction(_) => Some(Stage::Extracting),
            Self::Labelling(_) => Some(Stage::Labelling),
            Self::Redaction(_) => Some(Stage::Redacting),
        }
    }

    /// HTTP status reported to the caller of the entry endpoint
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedRequest(_) => 400,
            _ => 500,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CaviardError {
    fn from(err: std::io::Error) -> Self {
        CaviardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CaviardError {
    fn from(err: serde_json::Error) -> Self {
        CaviardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CaviardError {
    fn from(err: toml::de::Error) -> Self {
        CaviardError::Configuration(format!("TOML parse error: {err}"))
    }
}
