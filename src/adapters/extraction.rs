//! Extraction collaborator
//!
//! Turns a document path into plain text by calling the extraction service's
//! `POST /extract` endpoint.

use super::http::CollaboratorClient;
use crate::domain::{CollaboratorError, ExtractionRequest, ExtractionResponse, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for text extraction backends
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract the text of the document at `file_path`
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] on transport failure, non-success
    /// status or an undecodable body.
    async fn extract(&self, file_path: &str) -> std::result::Result<String, CollaboratorError>;
}

/// HTTP client for the extraction service
#[derive(Debug, Clone)]
pub struct HttpExtractionClient {
    client: CollaboratorClient,
}

impl HttpExtractionClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: CollaboratorClient::new(
                "extraction",
                base_url,
                "/extract",
                timeout,
                connect_timeout,
            )?,
        })
    }

    /// Full endpoint URL
    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl Extractor for HttpExtractionClient {
    async fn extract(&self, file_path: &str) -> std::result::Result<String, CollaboratorError> {
        let response: ExtractionResponse = self
            .client
            .post_json(&ExtractionRequest {
                file_path: file_path.to_string(),
            })
            .await?;
        Ok(response.text)
    }
}
