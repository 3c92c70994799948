//! Logging and observability
//!
//! This module provides structured logging with:
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cdp_report::logging::init_logging;
//! use cdp_report::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a report run
///
/// # Example
///
/// ```no_run
/// use cdp_report::log_report_complete;
/// use std::time::Duration;
///
/// log_report_complete!(38, Duration::from_secs(12));
/// ```
#[macro_export]
macro_rules! log_report_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            queries = $count,
            duration_ms = $duration.as_millis(),
            "Report completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cdp_report::log_error_with_context;
/// use cdp_report::domain::ReportError;
///
/// let error = ReportError::Configuration("Invalid config".to_string());
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
