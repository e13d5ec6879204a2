//! Shared HTTP plumbing for collaborator services
//!
//! Every outbound call goes through [`CollaboratorClient::post_json`], which
//! turns transport failures, non-success statuses and undecodable bodies into
//! [`CollaboratorError`] values naming the service.

use crate::domain::{CaviardError, CollaboratorError, Result};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// JSON-over-HTTP client bound to one collaborator
#[derive(Debug, Clone)]
pub struct CollaboratorClient {
    service: &'static str,
    endpoint: Url,
    client: Client,
    timeout: Duration,
}

impl CollaboratorClient {
    /// Create a client posting to `base_url` joined with `path`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(
        service: &'static str,
        base_url: &str,
        path: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let endpoint = endpoint_url(base_url, path).map_err(|e| {
            CaviardError::Configuration(format!("Invalid {service} service URL '{base_url}': {e}"))
        })?;

        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| {
                CaviardError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            service,
            endpoint,
            client,
            timeout,
        })
    }

    /// Full endpoint URL
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST `body` as JSON and decode a JSON response
    pub async fn post_json<B, R>(&self, body: &B) -> std::result::Result<R, CollaboratorError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        tracing::debug!(
            service = self.service,
            url = %self.endpoint,
            "Calling collaborator"
        );

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(
                service = self.service,
                status = status,
                "Collaborator rejected request"
            );
            return Err(CollaboratorError::Rejected {
                service: self.service,
                status,
                body,
            });
        }

        resp.json::<R>()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse {
                service: self.service,
                message: e.to_string(),
            })
    }

    fn transport_error(&self, err: reqwest::Error) -> CollaboratorError {
        if err.is_timeout() {
            CollaboratorError::Timeout {
                service: self.service,
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            CollaboratorError::Unavailable {
                service: self.service,
                message: err.to_string(),
            }
        }
    }
}

/// Join a base URL and an endpoint path, tolerating a trailing slash
pub fn endpoint_url(base_url: &str, path: &str) -> std::result::Result<Url, url::ParseError> {
    let base = Url::parse(base_url)?;
    if path.is_empty() {
        return Ok(base);
    }
    let mut joined = base.as_str().trim_end_matches('/').to_string();
    joined.push('/');
    joined.push_str(path.trim_start_matches('/'));
    Url::parse(&joined)
}
