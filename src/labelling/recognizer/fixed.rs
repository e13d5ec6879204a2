//! Deterministic recognizers for tests and recognizer-less deployments

use super::Recognizer;
use crate::domain::{Entity, LabellingError};
use async_trait::async_trait;

/// Recognizer that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

#[async_trait]
impl Recognizer for NoopRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, LabellingError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Recognizer returning a fixed result for every input
///
/// Used to drive the labelling engine deterministically.
#[derive(Debug, Clone, Default)]
pub struct FixedRecognizer {
    entities: Vec<Entity>,
    failure: Option<String>,
}

impl FixedRecognizer {
    /// Always return `entities`
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            failure: None,
        }
    }

    /// Always fail with a recognizer failure carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entities: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl Recognizer for FixedRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, LabellingError> {
        match &self.failure {
            Some(message) => Err(LabellingError::RecognizerFailure(message.clone())),
            None => Ok(self.entities.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}
