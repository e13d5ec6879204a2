//! Recognizer backed by an external NER model service
//!
//! Posts `{"text": ...}` and accepts either a bare array of entities or an
//! object with an `entities` array. Token-classification services reporting
//! `word` / `entity_group` are accepted as well, and their labels are mapped
//! through the configured label map (`PER` -> `PERSON`, `LOC` -> `GPE` by
//! default).

use super::Recognizer;
use crate::adapters::http::CollaboratorClient;
use crate::domain::{Entity, LabellingError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct RecognizeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct RemoteEntity {
    #[serde(alias = "word")]
    text: String,
    #[serde(alias = "entity_group", alias = "entity")]
    label: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecognizeResponse {
    Wrapped {
        #[serde(deserialize_with = "crate::domain::pipeline::null_as_empty")]
        entities: Vec<RemoteEntity>,
    },
    Bare(Vec<RemoteEntity>),
}

impl RecognizeResponse {
    fn into_entities(self) -> Vec<RemoteEntity> {
        match self {
            Self::Wrapped { entities } | Self::Bare(entities) => entities,
        }
    }
}

/// HTTP-backed recognizer
#[derive(Debug, Clone)]
pub struct RemoteRecognizer {
    client: CollaboratorClient,
    label_map: HashMap<String, String>,
}

impl RemoteRecognizer {
    /// Create a recognizer posting to `url`
    pub fn new(url: &str, label_map: HashMap<String, String>, timeout: Duration) -> Result<Self> {
        let client = CollaboratorClient::new("recognizer", url, "", timeout, timeout)?;
        Ok(Self { client, label_map })
    }

    fn map_label(&self, label: String) -> String {
        self.label_map.get(&label).cloned().unwrap_or(label)
    }
}

#[async_trait]
impl Recognizer for RemoteRecognizer {
    async fn recognize(&self, text: &str) -> std::result::Result<Vec<Entity>, LabellingError> {
        let response: RecognizeResponse = self
            .client
            .post_json(&RecognizeRequest { text })
            .await?;

        Ok(response
            .into_entities()
            .into_iter()
            .map(|e| Entity::new(e.text, self.map_label(e.label)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{labels, CollaboratorError};
    use crate::labelling::config::default_label_map;

    fn recognizer(url: &str) -> RemoteRecognizer {
        RemoteRecognizer::new(url, default_label_map(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_token_classification_output_is_mapped() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"word":"Isaac","entity_group":"PER","score":0.99},
                    {"word":"Norway","entity_group":"LOC","score":0.97},
                    {"word":"ACME","entity_group":"ORG","score":0.91}]"#,
            )
            .create_async()
            .await;

        let entities = recognizer(&server.url())
            .recognize("Isaac lives in Norway")
            .await
            .unwrap();
        assert_eq!(
            entities,
            vec![
                Entity::new("Isaac", labels::PERSON),
                Entity::new("Norway", labels::GPE),
                Entity::new("ACME", "ORG"),
            ]
        );
    }

    #[tokio::test]
    async fn test_wrapped_output() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/ner")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"entities":[{"text":"Jean","label":"PERSON"}]}"#)
            .create_async()
            .await;

        let entities = recognizer(&format!("{}/ner", server.url()))
            .recognize("Jean")
            .await
            .unwrap();
        assert_eq!(entities, vec![Entity::new("Jean", labels::PERSON)]);
    }

    #[tokio::test]
    async fn test_wrapped_null_entities() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"entities":null}"#)
            .create_async()
            .await;

        let entities = recognizer(&server.url()).recognize("rien").await.unwrap();
        assert!(entities.is_empty());
    }

    #[tokio::test]
    async fn test_service_failure_is_remote_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(503)
            .with_body("model loading")
            .create_async()
            .await;

        let err = recognizer(&server.url()).recognize("x").await.unwrap_err();
        assert!(matches!(
            err,
            LabellingError::Remote(CollaboratorError::Rejected { status: 503, .. })
        ));
    }
}
