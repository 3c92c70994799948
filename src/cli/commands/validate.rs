//! Validate config command implementation
//!
//! Configuration is loaded and validated before any command runs, so by the
//! time this command executes the configuration is known to be valid. It
//! prints a summary with every secret redacted.

use crate::config::{ReportConfig, SecretString};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(
        &self,
        config: &ReportConfig,
        config_path: Option<&str>,
    ) -> anyhow::Result<i32> {
        tracing::info!(
            config_path = config_path.unwrap_or("<environment>"),
            "Validating configuration"
        );

        println!("✅ Configuration is valid");
        println!();
        print!("{}", summary(config, config_path));

        Ok(0)
    }
}

fn presence(secret: &SecretString) -> &'static str {
    if secret.expose_secret().is_empty() {
        "not set"
    } else {
        "set"
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "<not set>"
    } else {
        value
    }
}

/// Configuration summary, safe to print
fn summary(config: &ReportConfig, config_path: Option<&str>) -> String {
    let timeout = config
        .cdp
        .timeout_seconds
        .map(|t| format!("{t}s"))
        .unwrap_or_else(|| "none".to_string());

    let lines = [
        "Configuration Summary:".to_string(),
        format!("  Source: {}", config_path.unwrap_or("environment only")),
        format!("  Log Level: {}", config.application.log_level),
        format!("  CDP Base URL: {}", config.cdp.base_url),
        format!("  CDP Business Unit: {}", or_unset(&config.cdp.business_unit)),
        format!("  CDP View: {}", or_unset(&config.cdp.view)),
        format!("  CDP User Key: {}", presence(&config.cdp.user_key)),
        format!("  CDP Secret: {}", presence(&config.cdp.secret)),
        format!("  CDP Timeout: {timeout}"),
        format!("  SMTP Server: {}:{}", config.smtp.host, config.smtp.port),
        format!("  SMTP Username: {}", or_unset(&config.smtp.username)),
        format!("  SMTP Password: {}", presence(&config.smtp.password)),
        format!("  Sender: {}", or_unset(&config.smtp.sender)),
        format!("  Recipient: {}", or_unset(&config.smtp.recipient)),
        format!("  Fail On Delivery Error: {}", config.delivery.fail_on_error),
        format!("  Countries: {}", config.report.countries.join(", ")),
        format!("  Excluded CRM IDs: {}", config.report.excluded_crm_ids.len()),
        format!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        ),
    ];

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
