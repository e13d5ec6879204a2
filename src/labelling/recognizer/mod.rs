//! Statistical recognizer capability
//!
//! The labelling engine treats general-purpose named-entity recognition as a
//! black box: `recognize(text) -> entities`. Labels are taken verbatim from
//! the implementation.

pub mod fixed;
pub mod heuristic;
pub mod remote;

pub use self::fixed::{FixedRecognizer, NoopRecognizer};
pub use self::heuristic::HeuristicRecognizer;
pub use self::remote::RemoteRecognizer;

use crate::domain::{Entity, LabellingError};
use crate::labelling::config::{RecognizerConfig, RecognizerKind};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Trait for named-entity recognizer implementations
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize entities in free text
    ///
    /// # Errors
    ///
    /// Returns [`LabellingError::RecognizerFailure`] when the text cannot be
    /// processed (for example malformed encoding), or
    /// [`LabellingError::Remote`] when a backing service fails.
    async fn recognize(&self, text: &str) -> Result<Vec<Entity>, LabellingError>;

    /// Short implementation name for logs
    fn name(&self) -> &'static str;
}

/// Build the recognizer selected by configuration
pub fn from_config(
    config: &RecognizerConfig,
    timeout: Duration,
) -> crate::domain::Result<Arc<dyn Recognizer>> {
    let recognizer: Arc<dyn Recognizer> = match config.kind {
        RecognizerKind::Heuristic => Arc::new(HeuristicRecognizer::new().map_err(|e| {
            crate::domain::CaviardError::Configuration(format!(
                "Failed to build heuristic recognizer: {e}"
            ))
        })?),
        RecognizerKind::None => Arc::new(NoopRecognizer),
        RecognizerKind::Remote => {
            let url = config.url.as_deref().ok_or_else(|| {
                crate::domain::CaviardError::Configuration(
                    "labelling.recognizer.url is required when kind = 'remote'".to_string(),
                )
            })?;
            Arc::new(RemoteRecognizer::new(url, config.label_map.clone(), timeout)?)
        }
    };

    tracing::debug!(recognizer = recognizer.name(), "Recognizer selected");
    Ok(recognizer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_heuristic() {
        let config = RecognizerConfig::default();
        let recognizer = from_config(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(recognizer.name(), "heuristic");
    }

    #[test]
    fn test_from_config_remote_requires_url() {
        let config = RecognizerConfig {
            kind: RecognizerKind::Remote,
            url: None,
            ..Default::default()
        };
        assert!(from_config(&config, Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_from_config_none() {
        let config = RecognizerConfig {
            kind: RecognizerKind::None,
            ..Default::default()
        };
        let recognizer = from_config(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(recognizer.name(), "none");
    }
}
