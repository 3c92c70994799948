//! Domain models and types for the report pipeline.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Typed predicates** ([`Predicate`]) that render to the CDP query language
//! - **Queries** ([`ProfileQuery`], [`ReportQuery`])
//! - **Results** ([`QueryResult`], [`ProfileRecord`])
//! - **Error types** ([`ReportError`], [`CdpError`], [`DeliveryError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use cdp_report::domain::{Predicate, ProfileQuery, ReportQuery};
//!
//! let query = ReportQuery::new(
//!     "Users in journey",
//!     ProfileQuery::crm_ids(Predicate::eq("attributes.uc1.BioMilestone", "LOYALS")),
//! );
//! assert_eq!(
//!     query.query().to_string(),
//!     r#"SELECT attributes.crmId FROM profiles WHERE attributes.uc1.BioMilestone = "LOYALS""#
//! );
//! ```

pub mod errors;
pub mod predicate;
pub mod profile;
pub mod query;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CdpError, DeliveryError, ReportError};
pub use predicate::{Comparison, Predicate, Value};
pub use profile::{ProfileAttributes, ProfileRecord, QueryResult};
pub use query::{ProfileQuery, ReportQuery, CRM_ID_FIELD};
pub use result::Result;
