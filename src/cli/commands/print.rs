//! Print command implementation
//!
//! Runs the report and streams every line to stdout as soon as its query
//! completes.

use crate::config::ReportConfig;
use crate::core::delivery::ConsoleSink;
use crate::core::report::{generate_report, ReportCatalog};
use clap::Args;

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {}

impl PrintArgs {
    /// Execute the print command
    pub async fn execute(&self, config: &ReportConfig) -> anyhow::Result<i32> {
        let Some(client) = super::cdp_client(config) else {
            return Ok(2);
        };

        let catalog = ReportCatalog::build(&config.report);
        let mut sink = ConsoleSink::stdout();

        generate_report(&client, &catalog, &mut sink).await?;

        Ok(0)
    }
}
