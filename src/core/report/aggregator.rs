//! Report aggregator - runs the catalog against a profile source
//!
//! Queries run strictly one after another in catalog order. Each result is
//! formatted into a line, recorded in the document and passed to the sink
//! before the next query is issued. The first failing query aborts the run.

use super::catalog::ReportCatalog;
use super::document::ReportDocument;
use super::format::format_result_line;
use crate::adapters::cdp::ProfileSource;
use crate::core::delivery::ReportSink;
use crate::domain::Result;
use std::time::Instant;

/// Sequential fold of catalog queries into a report document
pub struct ReportAggregator<'a> {
    source: &'a dyn ProfileSource,
}

impl<'a> ReportAggregator<'a> {
    pub fn new(source: &'a dyn ProfileSource) -> Self {
        Self { source }
    }

    /// Runs every query and returns the assembled document
    ///
    /// Title and section headers are emitted to the sink as well, so a
    /// streaming sink reproduces the document exactly.
    pub async fn run(
        &self,
        catalog: &ReportCatalog,
        sink: &mut dyn ReportSink,
    ) -> Result<ReportDocument> {
        let start_time = Instant::now();
        let mut document = ReportDocument::new();

        tracing::info!(
            queries = catalog.queries().count(),
            sections = catalog.sections().len(),
            "Starting report"
        );

        emit(&mut document, sink, catalog.title(), false)?;
        emit(&mut document, sink, "", false)?;

        for (index, section) in catalog.sections().iter().enumerate() {
            if index > 0 {
                emit(&mut document, sink, "", false)?;
            }
            emit(&mut document, sink, &section.header(), false)?;

            for report_query in section.queries() {
                let query_start = Instant::now();
                let result = match self.source.query(report_query.query()).await {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::error!(
                            label = report_query.label(),
                            completed = document.query_count(),
                            error = %e,
                            "Report query failed, aborting"
                        );
                        return Err(e);
                    }
                };

                tracing::debug!(
                    label = report_query.label(),
                    total = %result.total_count_display(),
                    sampled = result.profiles.len(),
                    duration_ms = query_start.elapsed().as_millis(),
                    "Query complete"
                );

                let line = format_result_line(report_query.label(), &result);
                emit(&mut document, sink, &line, true)?;
            }
        }

        crate::log_report_complete!(document.query_count(), start_time.elapsed());

        Ok(document)
    }
}

fn emit(
    document: &mut ReportDocument,
    sink: &mut dyn ReportSink,
    line: &str,
    is_result: bool,
) -> Result<()> {
    sink.line_appended(line)?;
    if is_result {
        document.push_result(line);
    } else {
        document.push_line(line);
    }
    Ok(())
}
