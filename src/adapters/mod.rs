//! External system integrations.
//!
//! - [`cdp`] - Customer Data Platform customers endpoint (reqwest)
//! - [`smtp`] - SMTP relay for the emailed report (lettre)
//!
//! # Design Pattern
//!
//! Each adapter sits behind a small trait ([`cdp::ProfileSource`],
//! [`smtp::Mailer`]) so the report pipeline can be exercised with in-memory
//! implementations.
//!
//! ```rust,no_run
//! use cdp_report::adapters::cdp::{CdpClient, ProfileSource};
//! use cdp_report::config::load_report_config;
//! use cdp_report::domain::{Predicate, ProfileQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_report_config(None)?;
//! let client = CdpClient::new(&config.cdp)?;
//! let result = client
//!     .query(&ProfileQuery::crm_ids(Predicate::eq("attributes.country", "IE")))
//!     .await?;
//! println!("IE profiles: {}", result.total_count_display());
//! # Ok(())
//! # }
//! ```

pub mod cdp;
pub mod smtp;
