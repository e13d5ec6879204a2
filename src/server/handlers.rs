//! Request handlers for the entry, label and health endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::AppState;
use crate::domain::{
    LabelRequest, LabelResponse, OrchestrationRequest, PipelineError, RedactionResponse,
};

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    /// Stage that failed, absent when the request itself was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
}

/// Failed request, rendered with the status its cause maps to.
#[derive(Debug)]
pub struct ApiError(PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(PipelineError::MalformedRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: self.0.to_string(),
            stage: self.0.stage().map(|s| s.as_str()),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// `POST /entry`: run the full Extract → Label → Redact pipeline.
pub async fn entry(
    State(state): State<AppState>,
    payload: Result<Json<OrchestrationRequest>, JsonRejection>,
) -> Result<Json<RedactionResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.orchestrator.run(request).await?;
    Ok(Json(response))
}

/// `POST /label`: label text with the in-process engine.
pub async fn label(
    State(state): State<AppState>,
    payload: Result<Json<LabelRequest>, JsonRejection>,
) -> Result<Json<LabelResponse>, ApiError> {
    let Json(LabelRequest { text }) = payload?;
    let entities = state
        .labeller
        .label(&text)
        .await
        .map_err(PipelineError::Labelling)?;
    tracing::debug!(entity_count = entities.len(), "Label request served");

    Ok(Json(LabelResponse {
        extracted_text: text,
        entities,
    }))
}

/// `GET /health`: liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
