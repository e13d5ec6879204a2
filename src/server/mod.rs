//! HTTP boundary for the pipeline.
//!
//! - `POST /entry` with `{file_path, forbidden_labels}` runs the pipeline and
//!   relays the redaction response (400 for malformed input, 500 when a stage
//!   fails)
//! - `POST /label` with `{text}` returns `{extracted_text, entities}`
//! - `GET /health` returns `{status, version}`

mod handlers;
mod routes;

pub use handlers::{ErrorBody, HealthResponse};
pub use routes::create_router;

use std::sync::Arc;
use tokio::sync::watch;

use crate::config::CaviardConfig;
use crate::core::Orchestrator;
use crate::domain::{CaviardError, Result};
use crate::labelling::{LabellingEngine, Labeller};

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    /// Engine behind `POST /label`.
    pub labeller: Arc<dyn Labeller>,
}

impl AppState {
    /// Build the state from explicit parts.
    pub fn new(orchestrator: Orchestrator, labeller: Arc<dyn Labeller>) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            labeller,
        }
    }

    /// Build the orchestrator and the local engine described by `config`.
    pub fn from_config(config: &CaviardConfig) -> Result<Self> {
        let orchestrator = Orchestrator::from_config(config)?;
        let engine = LabellingEngine::from_config(&config.labelling, config.services.timeout())?;
        Ok(Self::new(orchestrator, Arc::new(engine)))
    }
}

/// Start the HTTP server and run until `shutdown` flips to `true`.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(config: &CaviardConfig, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(state, &config.server.cors_origins);

    let addr = config
        .server
        .socket_addr()
        .map_err(CaviardError::Configuration)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| CaviardError::Server(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(
        addr = %addr,
        extraction = %config.services.extraction_url,
        redaction = %config.services.redaction_url,
        "Starting server at http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutdown requested, draining in-flight requests");
        })
        .await
        .map_err(|e| CaviardError::Server(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Extractor, Redactor};
    use crate::domain::{
        labels, CollaboratorError, Entity, LabellingError, RedactionRequest, RedactionResponse,
    };
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    struct EchoExtractor;

    #[async_trait]
    impl Extractor for EchoExtractor {
        async fn extract(&self, file_path: &str) -> std::result::Result<String, CollaboratorError> {
            if file_path.ends_with(".missing") {
                return Err(CollaboratorError::Rejected {
                    service: "extraction",
                    status: 404,
                    body: "not found".to_string(),
                });
            }
            Ok("Contact: jane@example.com".to_string())
        }
    }

    struct EchoRedactor;

    #[async_trait]
    impl Redactor for EchoRedactor {
        async fn redact(
            &self,
            request: &RedactionRequest,
        ) -> std::result::Result<RedactionResponse, CollaboratorError> {
            Ok(RedactionResponse {
                message: format!("{} entities", request.entities.len()),
                output_file: format!("{}.redacted", request.file_path),
                extra: Default::default(),
            })
        }
    }

    struct StaticLabeller;

    #[async_trait]
    impl Labeller for StaticLabeller {
        async fn label(&self, text: &str) -> std::result::Result<Vec<Entity>, LabellingError> {
            if text.is_empty() {
                return Err(LabellingError::RecognizerFailure("empty".to_string()));
            }
            Ok(vec![Entity::new("jane@example.com", labels::EMAIL)])
        }
    }

    fn test_app() -> axum::Router {
        let labeller: Arc<dyn Labeller> = Arc::new(StaticLabeller);
        let orchestrator = Orchestrator::new(
            Arc::new(EchoExtractor),
            labeller.clone(),
            Arc::new(EchoRedactor),
        );
        create_router(AppState::new(orchestrator, labeller), &[])
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_entry_success_relays_redaction_response() {
        let response = test_app()
            .oneshot(post(
                "/entry",
                r#"{"file_path":"/data/cv.pdf","forbidden_labels":["EMAIL"]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"message": "1 entities", "output_file": "/data/cv.pdf.redacted"})
        );
    }

    #[tokio::test]
    async fn test_entry_malformed_json_is_400() {
        let response = test_app()
            .oneshot(post("/entry", r#"{"file_path": 12"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().starts_with("Malformed request"));
        assert!(body.get("stage").is_none());
    }

    #[tokio::test]
    async fn test_entry_stage_failure_is_500() {
        let response = test_app()
            .oneshot(post("/entry", r#"{"file_path":"/data/cv.missing"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["stage"], "extracting");
    }

    #[tokio::test]
    async fn test_label_endpoint() {
        let response = test_app()
            .oneshot(post("/label", r#"{"text":"Contact: jane@example.com"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "extracted_text": "Contact: jane@example.com",
                "entities": [{"text": "jane@example.com", "label": "EMAIL"}]
            })
        );
    }

    #[tokio::test]
    async fn test_label_endpoint_failure() {
        let response = test_app()
            .oneshot(post("/label", r#"{"text":""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["stage"], "labelling");
    }

    #[test]
    fn test_state_from_default_config() {
        let mut config = CaviardConfig::default();
        config.labelling.recognizer = crate::labelling::RecognizerConfig {
            kind: crate::labelling::RecognizerKind::None,
            ..Default::default()
        };
        assert!(AppState::from_config(&config).is_ok());
    }
}
