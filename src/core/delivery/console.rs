//! Console sink: streams report lines to a writer (stdout in production)

use super::{DeliveryOutcome, ReportSink};
use crate::core::report::ReportDocument;
use crate::domain::Result;
use async_trait::async_trait;
use std::io::{self, Stdout, Write};

/// Writes each line as soon as it is produced
pub struct ConsoleSink<W: Write + Send> {
    writer: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W: Write + Send> ReportSink for ConsoleSink<W> {
    fn line_appended(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }

    async fn deliver(&mut self, _document: &ReportDocument) -> Result<DeliveryOutcome> {
        // Every line has already been written.
        Ok(DeliveryOutcome::Delivered)
    }
}
