//! Core orchestration for Caviard.
//!
//! - [`orchestrator`] - Extract → Label → Redact sequencing with fail-fast errors
//!
//! # Example
//!
//! ```rust,no_run
//! use caviard::config::load_config;
//! use caviard::core::Orchestrator;
//! use caviard::domain::OrchestrationRequest;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("caviard.toml")?;
//! let orchestrator = Orchestrator::from_config(&config)?;
//!
//! let response = orchestrator
//!     .run(OrchestrationRequest::new("/data/cv.pdf", vec!["PERSON".to_string()]))
//!     .await?;
//! println!("Redacted copy: {}", response.output_file);
//! # Ok(())
//! # }
//! ```

pub mod orchestrator;

pub use orchestrator::Orchestrator;
