//! Redact command implementation
//!
//! Runs one document through Extract → Label → Redact and prints the
//! redaction service's response. Ctrl+C abandons the in-flight call.

use crate::cli::{resolve_config, wait_for_shutdown};
use crate::core::Orchestrator;
use crate::domain::OrchestrationRequest;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Path of the document, as seen by the extraction and redaction services
    pub file_path: String,

    /// Labels to redact (repeatable or comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub forbid: Vec<String>,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(
        &self,
        config_path: Option<&str>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match resolve_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };
        let orchestrator = Orchestrator::from_config(&config)?;
        let request = OrchestrationRequest::new(self.file_path.clone(), self.forbid.clone());

        println!("📄 Redacting {}", self.file_path);

        let outcome = tokio::select! {
            outcome = orchestrator.run(request) => outcome,
            _ = wait_for_shutdown(shutdown_signal) => {
                println!("⚠️  Interrupted, request abandoned");
                return Ok(130);
            }
        };

        match outcome {
            Ok(response) => {
                println!("✅ {}", response.message);
                println!("{}", serde_json::to_string_pretty(&response)?);
                Ok(0)
            }
            Err(e) => {
                println!("❌ {e}");
                if let Some(stage) = e.stage() {
                    println!("   Failed stage: {stage}");
                }
                Ok(1)
            }
        }
    }
}
