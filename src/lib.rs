// Caviard - PII labelling and document redaction pipeline
// Copyright (c) 2025 Caviard Contributors
// Licensed under the MIT License

//! # Caviard - PII labelling and document redaction
//!
//! Caviard takes a document path, asks an extraction service for its text,
//! labels the personally-identifiable spans in that text, and hands the
//! entities to a redaction service that writes a redacted copy.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`server`] - HTTP boundary (`POST /entry`, `POST /label`, `GET /health`)
//! - [`core`] - Extract → Label → Redact orchestration
//! - [`labelling`] - Detectors, stopword filter, recognizers and the labelling engine
//! - [`adapters`] - Extraction, redaction and labelling service clients
//! - [`domain`] - Entities, pipeline bodies and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caviard::config::load_config;
//! use caviard::core::Orchestrator;
//! use caviard::domain::OrchestrationRequest;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("caviard.toml")?;
//!     let orchestrator = Orchestrator::from_config(&config)?;
//!
//!     let response = orchestrator
//!         .run(OrchestrationRequest::new("/data/cv.pdf", vec!["PERSON".into()]))
//!         .await?;
//!
//!     println!("Redacted copy: {}", response.output_file);
//!     Ok(())
//! }
//! ```
//!
//! ## Labelling
//!
//! The engine merges recognizer output with the pattern detectors (email,
//! phone, address, age, date), then drops locale stopwords:
//!
//! ```rust,no_run
//! use caviard::labelling::{LabellingConfig, LabellingEngine};
//! use caviard::labelling::recognizer::NoopRecognizer;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = LabellingEngine::new(&LabellingConfig::default(), Arc::new(NoopRecognizer))?;
//! for entity in engine.label("Contact: jane@example.com ou +33 6 12 34 56 78").await? {
//!     println!("{entity}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library errors are [`domain::CaviardError`]; a failed request yields exactly
//! one [`domain::PipelineError`] naming the stage that failed.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod labelling;
pub mod logging;
pub mod server;
