//! CLI command implementations
//!
//! Every command returns the process exit code:
//!
//! - `0` success
//! - `1` report emailed but delivery failed (only with `fail_on_error`)
//! - `2` configuration error
//! - `5` a CDP query failed

pub mod email;
pub mod list_queries;
pub mod print;
pub mod validate;

use crate::adapters::cdp::CdpClient;
use crate::config::ReportConfig;

/// Builds the CDP client, printing the failure when the configuration is unusable
fn cdp_client(config: &ReportConfig) -> Option<CdpClient> {
    match CdpClient::new(&config.cdp) {
        Ok(client) => Some(client),
        Err(e) => {
            crate::log_error_with_context!(&e, "Failed to create CDP client");
            eprintln!("❌ Failed to create CDP client");
            eprintln!("   Error: {e}");
            None
        }
    }
}
