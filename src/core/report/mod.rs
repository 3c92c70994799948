//! Report building and execution
//!
//! - [`catalog`] - the fixed, ordered set of labelled queries
//! - [`format`] - one line per query result
//! - [`document`] - the assembled report text
//! - [`aggregator`] - sequential execution against a [`ProfileSource`]

pub mod aggregator;
pub mod catalog;
pub mod document;
pub mod format;

pub use aggregator::ReportAggregator;
pub use catalog::{ReportCatalog, ReportFilters, ReportSection};
pub use document::ReportDocument;
pub use format::{format_result_line, sample_ids};

use crate::adapters::cdp::ProfileSource;
use crate::core::delivery::{DeliveryOutcome, ReportSink};
use crate::domain::Result;

/// Runs the whole catalog and hands the report to `sink`
///
/// Nothing is delivered when a query fails; the error is returned instead.
pub async fn generate_report(
    source: &dyn ProfileSource,
    catalog: &ReportCatalog,
    sink: &mut dyn ReportSink,
) -> Result<DeliveryOutcome> {
    let document = ReportAggregator::new(source).run(catalog, sink).await?;
    sink.deliver(&document).await
}
