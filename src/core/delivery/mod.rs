//! Report delivery
//!
//! A [`ReportSink`] sees every line as soon as the aggregator appends it and
//! is handed the finished document once all queries have succeeded. The
//! console sink streams; the email sink waits for the whole document.
//!
//! Delivery failures are reported as a [`DeliveryOutcome`] rather than an
//! error, and [`DeliveryPolicy`] decides whether they change the exit code.

pub mod console;
pub mod email;

pub use console::ConsoleSink;
pub use email::EmailSink;

use crate::core::report::ReportDocument;
use crate::domain::{DeliveryError, Result};
use async_trait::async_trait;

/// Destination for a report
#[async_trait]
pub trait ReportSink: Send {
    /// Called once per appended line, in report order
    fn line_appended(&mut self, _line: &str) -> Result<()> {
        Ok(())
    }

    /// Called once with the complete document after the last query
    async fn deliver(&mut self, document: &ReportDocument) -> Result<DeliveryOutcome>;
}

/// Result of handing the report to its destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Failed(DeliveryError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// How a failed delivery maps to the process exit code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryPolicy {
    pub fail_on_error: bool,
}

impl DeliveryPolicy {
    pub fn new(fail_on_error: bool) -> Self {
        Self { fail_on_error }
    }

    /// 0 unless delivery failed and failures are escalated, then 1
    pub fn exit_code(&self, outcome: &DeliveryOutcome) -> i32 {
        match outcome {
            DeliveryOutcome::Failed(_) if self.fail_on_error => 1,
            _ => 0,
        }
    }
}
