//! Assembled report text

/// The report as an ordered list of lines
///
/// Lines are appended in the order they are produced; the document is never
/// reordered or edited afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDocument {
    lines: Vec<String>,
    query_count: usize,
}

impl ReportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a title, header or blank line
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends a formatted query result line
    pub fn push_result(&mut self, line: impl Into<String>) {
        self.query_count += 1;
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of result lines, one per executed query
    pub fn query_count(&self) -> usize {
        self.query_count
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Full report text, newline-terminated
    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }
}
