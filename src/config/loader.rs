//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ReportConfig;
use super::secret::secret_string;
use crate::domain::errors::ReportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ReportConfig`]
/// 4. Applies environment variable overrides
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML does not parse or
/// the resulting configuration fails validation.
///
/// # Examples
///
/// ```no_run
/// use cdp_report::config::loader::load_config;
///
/// let config = load_config("cdp-report.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ReportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ReportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents);

    let config: ReportConfig = toml::from_str(&contents)
        .map_err(|e| ReportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Builds configuration from defaults and the process environment only
///
/// Used when no configuration file is given. Credentials that are not set
/// stay empty; the CDP rejects them on the first query.
pub fn load_from_env() -> Result<ReportConfig> {
    finish(ReportConfig::default())
}

/// Loads from `path` when given, otherwise from the environment
pub fn load_report_config(path: Option<&str>) -> Result<ReportConfig> {
    match path {
        Some(path) => load_config(path),
        None => load_from_env(),
    }
}

fn finish(mut config: ReportConfig) -> Result<ReportConfig> {
    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ReportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched. An unset variable is replaced by the
/// empty string and reported with a warning.
fn substitute_env_vars(input: &str) -> String {
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!(variable = %var_name, "Environment variable not set, substituting empty value");
                String::new()
            })
        });
        result.push_str(&processed);
        result.push('\n');
    }

    result
}

/// Applies environment variable overrides
///
/// Credentials and addresses use the plain names the scheduled job has always
/// been deployed with (`CDP_USER_KEY`, `SMTP_PASSWORD`, ...); every other
/// setting uses the `CDP_REPORT_<SECTION>_<KEY>` pattern.
fn apply_env_overrides(config: &mut ReportConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CDP_REPORT_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // CDP overrides
    if let Ok(val) = std::env::var("CDP_USER_KEY") {
        config.cdp.user_key = secret_string(val);
    }
    if let Ok(val) = std::env::var("CDP_USER_SECRET") {
        config.cdp.secret = secret_string(val);
    }
    if let Ok(val) = std::env::var("CDP_BUSINESS_UNIT") {
        config.cdp.business_unit = val;
    }
    if let Ok(val) = std::env::var("CDP_VIEW") {
        config.cdp.view = val;
    }
    if let Ok(val) = std::env::var("CDP_REPORT_CDP_BASE_URL") {
        config.cdp.base_url = val;
    }
    if let Ok(val) = std::env::var("CDP_REPORT_CDP_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.cdp.timeout_seconds = Some(timeout);
        }
    }

    // SMTP overrides
    if let Ok(val) = std::env::var("SENDER_EMAIL") {
        config.smtp.sender = val;
    }
    if let Ok(val) = std::env::var("RECIPIENT_EMAIL") {
        config.smtp.recipient = val;
    }
    if let Ok(val) = std::env::var("SMTP_USERNAME") {
        config.smtp.username = val;
    }
    if let Ok(val) = std::env::var("SMTP_PASSWORD") {
        config.smtp.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("CDP_REPORT_SMTP_HOST") {
        config.smtp.host = val;
    }
    if let Ok(val) = std::env::var("CDP_REPORT_SMTP_PORT") {
        if let Ok(port) = val.parse() {
            config.smtp.port = port;
        }
    }

    // Delivery overrides
    if let Ok(val) = std::env::var("CDP_REPORT_DELIVERY_FAIL_ON_ERROR") {
        config.delivery.fail_on_error = val.parse().unwrap_or(false);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CDP_REPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CDP_REPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
