//! Domain models and types for Caviard.
//!
//! The domain layer provides:
//! - **Entities** ([`Entity`]) and the fixed label values in [`labels`]
//! - **Error types** ([`CaviardError`], [`PipelineError`], [`CollaboratorError`],
//!   [`LabellingError`], [`StopwordError`])
//! - **Pipeline bodies** ([`OrchestrationRequest`], [`RedactionResponse`], ...)
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Request handling reports exactly one [`PipelineError`] naming the failed
//! [`Stage`]:
//!
//! ```rust
//! use caviard::domain::{CollaboratorError, PipelineError, Stage};
//!
//! let err = PipelineError::Extraction(CollaboratorError::Unavailable {
//!     service: "extraction",
//!     message: "connection refused".to_string(),
//! });
//! assert_eq!(err.stage(), Some(Stage::Extracting));
//! assert_eq!(err.status_code(), 500);
//! ```

pub mod entity;
pub mod errors;
pub mod pipeline;
pub mod result;

pub use entity::{entities_from_matches, labels, Entity};
pub use errors::{
    CaviardError, CollaboratorError, LabellingError, PipelineError, Stage, StopwordError,
};
pub use pipeline::{
    ExtractionRequest, ExtractionResponse, LabelRequest, LabelResponse, OrchestrationRequest,
    RedactionRequest, RedactionResponse,
};
pub use result::Result;
