//! Profile source trait definition
//!
//! The aggregator only needs "run this query, give me the result". Keeping
//! that behind a trait lets the pipeline run against the HTTP client in
//! production and against in-memory sources in tests.

use crate::domain::{ProfileQuery, QueryResult, Result};
use async_trait::async_trait;

/// Anything that can answer a profile query
///
/// Implementations must not retry: a failed query is reported as-is and
/// aborts the report.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Runs `query` and returns its count and profile sample
    async fn query(&self, query: &ProfileQuery) -> Result<QueryResult>;
}
