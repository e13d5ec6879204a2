//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output with span timings
//! - Optional JSON log files with rotation
//! - `RUST_LOG` override of the configured level
//!
//! # Example
//!
//! ```no_run
//! use caviard::logging::init_logging;
//! use caviard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Service started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use caviard::log_stage_start;
/// use caviard::domain::Stage;
///
/// log_stage_start!(Stage::Extracting, "/data/cv.pdf");
/// ```
#[macro_export]
macro_rules! log_stage_start {
    ($stage:expr, $file_path:expr) => {
        tracing::info!(
            stage = %$stage,
            file_path = %$file_path,
            "Stage started"
        );
    };
}

/// Log the completion of a pipeline stage
///
/// # Example
///
/// ```no_run
/// use caviard::log_stage_complete;
/// use caviard::domain::Stage;
/// use std::time::Duration;
///
/// log_stage_complete!(Stage::Labelling, Duration::from_millis(40));
/// ```
#[macro_export]
macro_rules! log_stage_complete {
    ($stage:expr, $duration:expr) => {
        tracing::debug!(
            stage = %$stage,
            duration_ms = $duration.as_millis() as u64,
            "Stage completed"
        );
    };
}

/// Log the completion of an orchestration
///
/// # Example
///
/// ```no_run
/// use caviard::log_pipeline_complete;
/// use std::time::Duration;
///
/// log_pipeline_complete!("/data/cv.pdf", 12, Duration::from_secs(3));
/// ```
#[macro_export]
macro_rules! log_pipeline_complete {
    ($file_path:expr, $entity_count:expr, $duration:expr) => {
        tracing::info!(
            file_path = %$file_path,
            entity_count = $entity_count,
            duration_ms = $duration.as_millis() as u64,
            "Pipeline completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use caviard::log_error_with_context;
/// use caviard::domain::CaviardError;
///
/// let error = CaviardError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
