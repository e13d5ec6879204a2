//! Entity labelling
//!
//! Combines a statistical [`recognizer`] with the deterministic [`detector`]
//! set, then suppresses locale [`stopwords`]. The [`Labeller`] trait is the
//! seam the orchestrator depends on: [`LabellingEngine`] implements it
//! in-process and [`crate::adapters::labelling::HttpLabellingClient`]
//! delegates to a remote labelling service.

pub mod config;
pub mod detector;
pub mod engine;
pub mod overlap;
pub mod recognizer;
pub mod stopwords;

pub use config::{LabellingConfig, RecognizerConfig, RecognizerKind};
pub use engine::LabellingEngine;
pub use stopwords::StopwordSet;

use crate::domain::{Entity, LabellingError};
use async_trait::async_trait;

/// Trait for anything that turns text into a labelled entity list
#[async_trait]
pub trait Labeller: Send + Sync {
    /// Label free text
    async fn label(&self, text: &str) -> Result<Vec<Entity>, LabellingError>;
}
