//! Redaction collaborator
//!
//! Hands the entity list and the caller's forbidden labels to the redaction
//! service's `POST /anonymize` endpoint, which rewrites the document.

use super::http::CollaboratorClient;
use crate::domain::{CollaboratorError, RedactionRequest, RedactionResponse, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Trait for redaction backends
#[async_trait]
pub trait Redactor: Send + Sync {
    /// Redact the document described by `request`
    ///
    /// # Errors
    ///
    /// Returns a [`CollaboratorError`] on transport failure, non-success
    /// status or an undecodable body.
    async fn redact(
        &self,
        request: &RedactionRequest,
    ) -> std::result::Result<RedactionResponse, CollaboratorError>;
}

/// HTTP client for the redaction service
#[derive(Debug, Clone)]
pub struct HttpRedactionClient {
    client: CollaboratorClient,
}

impl HttpRedactionClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: CollaboratorClient::new(
                "redaction",
                base_url,
                "/anonymize",
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
impl Redactor for HttpRedactionClient {
    async fn redact(
        &self,
        request: &RedactionRequest,
    ) -> std::result::Result<RedactionResponse, CollaboratorError> {
        self.client.post_json(request).await
    }
}
