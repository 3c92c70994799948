// CDP Report - daily UC1 audience report from the Customer Data Platform
// Copyright (c) 2025 CDP Report Contributors
// Licensed under the MIT License

//! # CDP Report
//!
//! A scheduled batch job that runs a fixed sequence of filtered profile
//! queries against a Customer Data Platform (CDP), turns each result into a
//! `label: total\t(sample ids)` line and either prints the report or emails it.
//!
//! ## Architecture
//!
//! Data flows one way: catalog → CDP client → aggregator → sink.
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Query catalog, aggregation and delivery
//! - [`adapters`] - External integrations (CDP over HTTP, SMTP)
//! - [`domain`] - Predicates, queries, results and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cdp_report::adapters::cdp::CdpClient;
//! use cdp_report::config::load_report_config;
//! use cdp_report::core::delivery::ConsoleSink;
//! use cdp_report::core::report::{generate_report, ReportCatalog};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_report_config(Some("cdp-report.toml"))?;
//!     let client = CdpClient::new(&config.cdp)?;
//!
//!     let catalog = ReportCatalog::build(&config.report);
//!     let mut sink = ConsoleSink::stdout();
//!     generate_report(&client, &catalog, &mut sink).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Queries
//!
//! Filters are typed [`domain::Predicate`] trees and only become query text
//! when a request is sent:
//!
//! ```rust
//! use cdp_report::domain::{Predicate, ProfileQuery};
//!
//! let query = ProfileQuery::crm_ids(
//!     Predicate::eq("attributes.country", "GB").and(Predicate::ne("attributes.crmId", "42")),
//! );
//! assert_eq!(
//!     query.to_string(),
//!     r#"SELECT attributes.crmId FROM profiles WHERE attributes.country = "GB" AND attributes.crmId != "42""#
//! );
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::Result`], whose error is [`domain::ReportError`].
//! Any CDP failure aborts the run before anything is delivered; a failed
//! email is reported as a delivery outcome instead.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
