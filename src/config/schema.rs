//! Configuration schema types
//!
//! Every section has defaults, so an empty TOML document (or no file at all)
//! yields a usable configuration once the environment supplies credentials.

use crate::config::secret::{empty_secret, SecretString};
use serde::{Deserialize, Serialize};

/// Main report configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// CDP endpoint and credentials
    #[serde(default)]
    pub cdp: CdpConfig,

    /// SMTP relay and addressing for the email variant
    #[serde(default)]
    pub smtp: SmtpConfig,

    /// Delivery failure policy
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Filters shared by every report query
    #[serde(default)]
    pub report: ReportSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReportConfig {
    /// Validates the configuration
    ///
    /// Only structural settings are checked. Credentials and addresses are
    /// left to the CDP and the SMTP relay, which report them far more
    /// precisely than a local check could.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.cdp.validate()?;
        self.smtp.validate()?;
        self.report.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// CDP endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdpConfig {
    /// Base URL of the CDP API (without the `/api/...` path)
    #[serde(default = "default_cdp_base_url")]
    pub base_url: String,

    /// Business unit the view belongs to
    #[serde(default)]
    pub business_unit: String,

    /// View whose customers are queried
    #[serde(default)]
    pub view: String,

    /// Application user key
    #[serde(default = "empty_secret")]
    pub user_key: SecretString,

    /// Application user secret
    #[serde(default = "empty_secret")]
    pub secret: SecretString,

    /// Per-request timeout in seconds; unset means wait indefinitely
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for CdpConfig {
    fn default() -> Self {
        Self {
            base_url: default_cdp_base_url(),
            business_unit: String::new(),
            view: String::new(),
            user_key: empty_secret(),
            secret: empty_secret(),
            timeout_seconds: None,
        }
    }
}

impl CdpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("cdp.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("cdp.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("cdp.timeout_seconds must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}

/// SMTP configuration for the email variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host (STARTTLS is always used)
    #[serde(default = "default_smtp_host")]
    pub host: String,

    /// SMTP submission port
    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Login user name
    #[serde(default)]
    pub username: String,

    /// Login password
    #[serde(default = "empty_secret")]
    pub password: SecretString,

    /// `From` address
    #[serde(default)]
    pub sender: String,

    /// `To` address
    #[serde(default)]
    pub recipient: String,

    /// Subject prefix; the run date is appended as ` - YYYY-MM-DD`
    #[serde(default = "default_subject_prefix")]
    pub subject_prefix: String,

    /// Timeout for each SMTP command in seconds
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: empty_secret(),
            sender: String::new(),
            recipient: String::new(),
            subject_prefix: default_subject_prefix(),
            timeout_seconds: None,
        }
    }
}

impl SmtpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("smtp.host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("smtp.port must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Delivery failure policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Exit non-zero when the email could not be delivered
    ///
    /// Off by default: a failed send is logged and the run still succeeds.
    #[serde(default)]
    pub fail_on_error: bool,
}

/// Filters applied to every report query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// ISO country codes of the population under report
    #[serde(default = "default_countries")]
    pub countries: Vec<String>,

    /// CRM ids of internal test users, excluded from every count
    #[serde(default = "default_excluded_crm_ids")]
    pub excluded_crm_ids: Vec<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            countries: default_countries(),
            excluded_crm_ids: default_excluded_crm_ids(),
        }
    }
}

impl ReportSettings {
    fn validate(&self) -> Result<(), String> {
        if self.countries.is_empty() {
            return Err("report.countries cannot be empty".to_string());
        }

        if self.countries.iter().any(|c| c.trim().is_empty()) {
            return Err("report.countries cannot contain empty entries".to_string());
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging (JSON lines)
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".into());
        }

        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cdp_base_url() -> String {
    "https://cdp.eu5.gigya.com".to_string()
}

fn default_smtp_host() -> String {
    "smtp.office365.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_subject_prefix() -> String {
    "Daily UC1 Report".to_string()
}

fn default_countries() -> Vec<String> {
    vec!["GB".to_string(), "IE".to_string()]
}

fn default_excluded_crm_ids() -> Vec<String> {
    ["1005895385", "1005895387", "1005911273", "1005911400"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cdp.base_url, "https://cdp.eu5.gigya.com");
        assert_eq!(config.smtp.host, "smtp.office365.com");
        assert_eq!(config.smtp.port, 587);
        assert!(!config.delivery.fail_on_error);
        assert_eq!(config.report.countries, vec!["GB", "IE"]);
        assert_eq!(config.report.excluded_crm_ids.len(), 4);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: ReportConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.smtp.subject_prefix, "Daily UC1 Report");
        assert!(config.cdp.timeout_seconds.is_none());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ReportConfig::default();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_base_url_requires_scheme() {
        let mut config = ReportConfig::default();
        config.cdp.base_url = "cdp.eu5.gigya.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ReportConfig::default();
        config.cdp.timeout_seconds = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_countries_rejected() {
        let mut config = ReportConfig::default();
        config.report.countries.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_credentials_are_not_a_local_error() {
        let config = ReportConfig::default();
        assert!(config.cdp.business_unit.is_empty());
        assert!(config.smtp.sender.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = ReportConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
