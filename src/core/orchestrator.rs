//! Pipeline orchestrator - sequences Extract → Label → Redact
//!
//! Each request walks three stages strictly in order. The first failing
//! stage ends the request with a [`PipelineError`] naming it; later stages
//! are never invoked and nothing is retried or cached.

use crate::adapters::{
    Extractor, HttpExtractionClient, HttpLabellingClient, HttpRedactionClient, Redactor,
};
use crate::config::CaviardConfig;
use crate::domain::{
    CollaboratorError, OrchestrationRequest, PipelineError, RedactionRequest,
    RedactionResponse, Result, Stage,
};
use crate::labelling::{LabellingEngine, Labeller};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

/// Default bound on each stage when none is configured
const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Pipeline orchestrator
///
/// Holds only shared, immutable collaborators, so one instance serves any
/// number of concurrent requests.
#[derive(Clone)]
pub struct Orchestrator {
    extractor: Arc<dyn Extractor>,
    labeller: Arc<dyn Labeller>,
    redactor: Arc<dyn Redactor>,
    stage_timeout: Duration,
}

impl Orchestrator {
    /// Create an orchestrator over explicit collaborators
    pub fn new(
        extractor: Arc<dyn Extractor>,
        labeller: Arc<dyn Labeller>,
        redactor: Arc<dyn Redactor>,
    ) -> Self {
        Self {
            extractor,
            labeller,
            redactor,
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }

    /// Bound every stage by `timeout`
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Build the HTTP collaborators and labeller described by `config`
    ///
    /// Labelling runs in-process unless `services.labelling_url` is set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a service URL is invalid or the
    /// labelling engine cannot be built.
    pub fn from_config(config: &CaviardConfig) -> Result<Self> {
        let services = &config.services;
        let timeout = services.timeout();
        let connect_timeout = services.connect_timeout();

        let extractor = Arc::new(HttpExtractionClient::new(
            &services.extraction_url,
            timeout,
            connect_timeout,
        )?);
        let redactor = Arc::new(HttpRedactionClient::new(
            &services.redaction_url,
            timeout,
            connect_timeout,
        )?);

        let labeller: Arc<dyn Labeller> = match services.labelling_url {
            Some(ref url) => {
                tracing::info!(url = %url, "Delegating labelling to remote service");
                Arc::new(HttpLabellingClient::new(url, timeout, connect_timeout)?)
            }
            None => Arc::new(LabellingEngine::from_config(&config.labelling, timeout)?),
        };

        tracing::debug!(
            extraction = %extractor.endpoint(),
            redaction = %redactor.endpoint(),
            timeout_secs = timeout.as_secs(),
            "Orchestrator configured"
        );

        Ok(Self::new(extractor, labeller, redactor).with_stage_timeout(timeout))
    }

    /// Run one request through the pipeline
    ///
    /// Returns the redaction collaborator's response verbatim. Dropping the
    /// returned future cancels whichever collaborator call is in flight.
    ///
    /// # Errors
    ///
    /// Returns exactly one [`PipelineError`]: `MalformedRequest` before any
    /// stage runs, or the error of the first failing stage.
    pub async fn run(
        &self,
        request: OrchestrationRequest,
    ) -> std::result::Result<RedactionResponse, PipelineError> {
        let span = tracing::info_span!(
            "orchestration",
            request_id = %Uuid::new_v4(),
            file_path = %request.file_path,
        );
        self.run_stages(request).instrument(span).await
    }

    async fn run_stages(
        &self,
        request: OrchestrationRequest,
    ) -> std::result::Result<RedactionResponse, PipelineError> {
        if request.file_path.trim().is_empty() {
            return Err(PipelineError::MalformedRequest(
                "file_path must not be empty".to_string(),
            ));
        }

        let start = Instant::now();
        let OrchestrationRequest {
            file_path,
            forbidden_labels,
        } = request;

        // Extracting
        crate::log_stage_start!(Stage::Extracting, &file_path);
        let stage_start = Instant::now();
        let text = self
            .bounded("extraction", self.extractor.extract(&file_path))
            .await
            .map_err(|e| self.fail(PipelineError::Extraction(e)))?;
        crate::log_stage_complete!(Stage::Extracting, stage_start.elapsed());

        // Labelling
        crate::log_stage_start!(Stage::Labelling, &file_path);
        let stage_start = Instant::now();
        let entities = self
            .bounded("labelling", self.labeller.label(&text))
            .await
            .map_err(|e| self.fail(PipelineError::Labelling(e)))?;
        tracing::info!(entity_count = entities.len(), "Entities labelled");
        crate::log_stage_complete!(Stage::Labelling, stage_start.elapsed());

        // Redacting
        crate::log_stage_start!(Stage::Redacting, &file_path);
        let stage_start = Instant::now();
        let entity_count = entities.len();
        let redaction_request = RedactionRequest {
            file_path,
            entities,
            forbidden_labels,
        };
        let response = self
            .bounded("redaction", self.redactor.redact(&redaction_request))
            .await
            .map_err(|e| self.fail(PipelineError::Redaction(e)))?;
        crate::log_stage_complete!(Stage::Redacting, stage_start.elapsed());

        crate::log_pipeline_complete!(&redaction_request.file_path, entity_count, start.elapsed());
        Ok(response)
    }

    /// Await `fut`, converting an elapsed stage timeout into `E`
    async fn bounded<T, E, F>(&self, service: &'static str, fut: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: From<CollaboratorError>,
    {
        match tokio::time::timeout(self.stage_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(E::from(CollaboratorError::Timeout {
                service,
                timeout_secs: self.stage_timeout.as_secs(),
            })),
        }
    }

    fn fail(&self, err: PipelineError) -> PipelineError {
        tracing::error!(
            stage = %err.stage().map(|s| s.as_str()).unwrap_or("request"),
            error = %err,
            "Pipeline failed"
        );
        err
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("stage_timeout", &self.stage_timeout)
            .finish_non_exhaustive()
    }
}
