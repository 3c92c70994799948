//! Configuration management for the report job.
//!
//! # Overview
//!
//! Configuration comes from an optional TOML file plus the process
//! environment:
//! - Environment variable substitution (`${VAR_NAME}`) inside the file
//! - Default values for every setting
//! - Environment overrides applied after parsing
//! - Structural validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cdp_report::config::load_report_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // No file: defaults plus CDP_USER_KEY, CDP_USER_SECRET, ... from the environment
//! let config = load_report_config(None)?;
//! println!("CDP: {}", config.cdp.base_url);
//!
//! // With a file
//! let config = load_report_config(Some("cdp-report.toml"))?;
//! println!("SMTP: {}:{}", config.smtp.host, config.smtp.port);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [cdp]
//! base_url = "https://cdp.eu5.gigya.com"
//! business_unit = "${CDP_BUSINESS_UNIT}"
//! view = "${CDP_VIEW}"
//!
//! [smtp]
//! host = "smtp.office365.com"
//! port = 587
//! subject_prefix = "Daily UC1 Report"
//!
//! [delivery]
//! fail_on_error = false
//!
//! [report]
//! countries = ["GB", "IE"]
//! excluded_crm_ids = ["1005895385", "1005895387", "1005911273", "1005911400"]
//! ```
//!
//! # Environment Variables
//!
//! Credentials are normally supplied only through the environment (or a
//! `.env` file):
//!
//! ```bash
//! export CDP_USER_KEY="..."
//! export CDP_USER_SECRET="..."
//! export CDP_BUSINESS_UNIT="..."
//! export CDP_VIEW="..."
//! export SENDER_EMAIL="reports@example.com"
//! export RECIPIENT_EMAIL="team@example.com"
//! export SMTP_USERNAME="reports@example.com"
//! export SMTP_PASSWORD="..."
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_from_env, load_report_config};
pub use schema::{
    ApplicationConfig, CdpConfig, DeliveryConfig, LoggingConfig, ReportConfig, ReportSettings,
    SmtpConfig,
};
pub use secret::{empty_secret, secret_string, SecretString, SecretValue};
