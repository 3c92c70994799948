//! Domain error types
//!
//! This module defines the error hierarchy for the report pipeline.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main report error type
///
/// This is the primary error type used throughout the application.
/// It wraps the CDP and delivery error families and adds the ambient
/// categories: configuration and I/O.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CDP query errors (always fatal for a run)
    #[error("CDP error: {0}")]
    Cdp(#[from] CdpError),

    /// Report delivery errors
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// CDP-specific errors
///
/// Errors that occur when querying the Customer Data Platform. None of them
/// is retried; the first one aborts the whole report.
#[derive(Debug, Error)]
pub enum CdpError {
    /// The CDP answered with a status other than 200
    #[error("Failed to fetch data from CDP. Status: {status}, Response: {body}")]
    Upstream { status: u16, body: String },

    /// The response body was not valid JSON
    #[error("Failed to decode JSON ({reason}). Content: {body}")]
    Decode { body: String, reason: String },

    /// The response was JSON but not shaped like a profile listing
    #[error("Invalid response from CDP. {0}")]
    Schema(String),

    /// The request never produced a response
    #[error("Failed to connect to CDP: {0}")]
    Connection(String),

    /// The configured base URL cannot be turned into a customers endpoint
    #[error("Invalid CDP endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Delivery-specific errors
///
/// Raised by the email path. The email sink catches these and reports them
/// as a failed delivery outcome instead of aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// Sender or recipient is not a valid mailbox
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The message could not be assembled
    #[error("Failed to build message: {0}")]
    Message(String),

    /// The SMTP relay could not be set up or reached
    #[error("Failed to connect to SMTP server: {0}")]
    Connection(String),

    /// STARTTLS, login or the send itself failed
    #[error("Failed to send email: {0}")]
    Send(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_error_display() {
        let err = ReportError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_upstream_error_carries_status_and_body() {
        let err = CdpError::Upstream {
            status: 403,
            body: "{\"errorCode\":403005}".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("Status: 403"));
        assert!(message.contains("403005"));
    }

    #[test]
    fn test_cdp_error_conversion() {
        let cdp_err = CdpError::Schema("Profiles array not found in response.".to_string());
        let report_err: ReportError = cdp_err.into();
        assert!(matches!(report_err, ReportError::Cdp(CdpError::Schema(_))));
    }

    #[test]
    fn test_delivery_error_conversion() {
        let delivery_err = DeliveryError::Send("535 5.7.3 Authentication unsuccessful".into());
        let report_err: ReportError = delivery_err.into();
        assert!(matches!(report_err, ReportError::Delivery(_)));
        assert!(report_err.to_string().contains("Authentication unsuccessful"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let report_err: ReportError = io_err.into();
        assert!(matches!(report_err, ReportError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let report_err: ReportError = toml_err.into();
        assert!(matches!(report_err, ReportError::Configuration(_)));
        assert!(report_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &ReportError::Configuration("x".to_string());
        let _: &dyn std::error::Error = &CdpError::Connection("x".to_string());
        let _: &dyn std::error::Error = &DeliveryError::Message("x".to_string());
    }
}
