//! Collaborator service integrations for Caviard.
//!
//! - [`extraction`] - document path to plain text ([`Extractor`])
//! - [`redaction`] - entity list to redacted document ([`Redactor`])
//! - [`labelling`] - remote labelling service ([`crate::labelling::Labeller`])
//! - [`http`] - shared JSON-over-HTTP client
//!
//! # Design Pattern
//!
//! Each collaborator sits behind a trait so the orchestrator can be driven
//! with in-memory implementations in tests. The HTTP clients share
//! [`http::CollaboratorClient`], which maps every failure to a
//! [`crate::domain::CollaboratorError`] naming the service.
//!
//! ```rust,no_run
//! use caviard::adapters::{Extractor, HttpExtractionClient};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpExtractionClient::new(
//!     "http://127.0.0.1:8081",
//!     Duration::from_secs(120),
//!     Duration::from_secs(10),
//! )?;
//! let text = client.extract("/data/cv.pdf").await?;
//! # Ok(())
//! # }
//! ```

pub mod extraction;
pub mod http;
pub mod labelling;
pub mod redaction;

pub use extraction::{Extractor, HttpExtractionClient};
pub use labelling::HttpLabellingClient;
pub use redaction::{HttpRedactionClient, Redactor};
