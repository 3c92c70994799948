//! Core business logic for the report.
//!
//! # Modules
//!
//! - [`report`] - Query catalog, line formatting and the sequential aggregator
//! - [`delivery`] - Console and email sinks plus the exit-code policy
//!
//! # Report Workflow
//!
//! 1. **Build catalog**: Render every labelled query for the configured countries
//! 2. **Query CDP**: Run each query in order, one at a time
//! 3. **Format**: Turn each result into `label: total\t(ids)`
//! 4. **Deliver**: Stream to stdout or email the finished document
//!
//! # Example
//!
//! ```rust,no_run
//! use cdp_report::adapters::cdp::CdpClient;
//! use cdp_report::config::load_report_config;
//! use cdp_report::core::delivery::ConsoleSink;
//! use cdp_report::core::report::{generate_report, ReportCatalog};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_report_config(None)?;
//! let client = CdpClient::new(&config.cdp)?;
//! let catalog = ReportCatalog::build(&config.report);
//!
//! let mut sink = ConsoleSink::stdout();
//! let outcome = generate_report(&client, &catalog, &mut sink).await?;
//! assert!(outcome.is_delivered());
//! # Ok(())
//! # }
//! ```

pub mod delivery;
pub mod report;
