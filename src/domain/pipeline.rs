//! Request and response bodies exchanged along the pipeline
//!
//! Field names are part of the collaborator contracts and must stay stable.

use super::Entity;
use serde::{Deserialize, Deserializer, Serialize};

/// Inbound `POST /entry` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    /// Path of the document to redact
    pub file_path: String,

    /// Labels the caller wants redacted
    #[serde(default)]
    pub forbidden_labels: Vec<String>,
}

impl OrchestrationRequest {
    /// Create a request
    pub fn new(file_path: impl Into<String>, forbidden_labels: Vec<String>) -> Self {
        Self {
            file_path: file_path.into(),
            forbidden_labels,
        }
    }
}

/// Body sent to the Extraction collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Path of the document to read
    pub file_path: String,
}

/// Body returned by the Extraction collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Extracted plain text
    pub text: String,
}

/// Body sent to a labelling service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRequest {
    /// Text to label
    pub text: String,
}

/// Body returned by a labelling service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelResponse {
    /// The text that was labelled, echoed back
    pub extracted_text: String,

    /// Entities found in the text (`null` reads as none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entities: Vec<Entity>,
}

/// Body sent to the Redaction collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionRequest {
    /// Original document path
    pub file_path: String,

    /// Every non-suppressed entity found in the document
    pub entities: Vec<Entity>,

    /// Labels to redact, forwarded from the caller untouched
    pub forbidden_labels: Vec<String>,
}

/// Body returned by the Redaction collaborator and relayed to the caller
///
/// Fields beyond `message` and `output_file` are preserved so the response
/// reaches the caller verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactionResponse {
    /// Human-readable outcome
    pub message: String,

    /// Path of the redacted document
    pub output_file: String,

    /// Any additional fields returned by the collaborator
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Read a list that a collaborator may send as `null` when it is empty
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
