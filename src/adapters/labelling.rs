//! Remote labelling service client
//!
//! Lets the orchestrator delegate labelling to another instance's
//! `POST /label` endpoint instead of running the engine in-process.

use super::http::CollaboratorClient;
use crate::domain::{Entity, LabelRequest, LabelResponse, LabellingError, Result};
use crate::labelling::Labeller;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP client for a labelling service
#[derive(Debug, Clone)]
pub struct HttpLabellingClient {
    client: CollaboratorClient,
}

impl HttpLabellingClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: CollaboratorClient::new(
                "labelling",
                base_url,
                "/label",
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
impl Labeller for HttpLabellingClient {
    async fn label(&self, text: &str) -> std::result::Result<Vec<Entity>, LabellingError> {
        let response: LabelResponse = self
            .client
            .post_json(&LabelRequest {
                text: text.to_string(),
            })
            .await?;
        Ok(response.entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{labels, CollaboratorError};
    use serde_json::json;

    fn client(url: &str) -> HttpLabellingClient {
        HttpLabellingClient::new(url, Duration::from_secs(5), Duration::from_secs(1)).unwrap()
    }

    #[tokio::test]
    async fn test_label_returns_entities() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/label")
            .match_body(mockito::Matcher::Json(json!({"text": "Appelez le 06 12 34 56 78"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"extracted_text":"Appelez le 06 12 34 56 78",
                    "entities":[{"text":"06 12 34 56 78","label":"PHONE"}]}"#,
            )
            .create_async()
            .await;

        let entities = client(&server.url())
            .label("Appelez le 06 12 34 56 78")
            .await
            .unwrap();
        assert_eq!(entities, vec![Entity::new("06 12 34 56 78", labels::PHONE)]);
    }

    #[tokio::test]
    async fn test_null_entities_mean_nothing_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/label")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"extracted_text":"rien","entities":null}"#)
            .create_async()
            .await;

        let entities = client(&server.url()).label("rien").await.unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn test_label_service_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/label")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = client(&server.url()).label("x").await.unwrap_err();
        assert!(matches!(
            err,
            LabellingError::Remote(CollaboratorError::Rejected { status: 500, .. })
        ));
    }
}
