//! List-queries command implementation
//!
//! Prints every report label with the query it runs, so the catalog can be
//! reviewed without touching the CDP.

use crate::config::ReportConfig;
use crate::core::report::{ReportCatalog, ReportSection};
use clap::Args;

/// Arguments for the list-queries command
#[derive(Args, Debug)]
pub struct ListQueriesArgs {
    /// Only list sections whose title contains this text (case-insensitive)
    #[arg(short, long)]
    pub section: Option<String>,
}

impl ListQueriesArgs {
    /// Execute the list-queries command
    pub async fn execute(&self, config: &ReportConfig) -> anyhow::Result<i32> {
        let catalog = ReportCatalog::build(&config.report);

        match render_listing(&catalog, self.section.as_deref()) {
            Some(listing) => {
                print!("{listing}");
                Ok(0)
            }
            None => {
                eprintln!(
                    "❌ No report section matches '{}'",
                    self.section.as_deref().unwrap_or_default()
                );
                Ok(2)
            }
        }
    }
}

/// Renders the selected sections, or `None` when the filter matches nothing
fn render_listing(catalog: &ReportCatalog, filter: Option<&str>) -> Option<String> {
    let sections: Vec<&ReportSection> = match filter {
        Some(needle) => catalog.matching_sections(needle),
        None => catalog.sections().iter().collect(),
    };
    if sections.is_empty() {
        return None;
    }

    let mut out = format!("{}\n", catalog.title());
    let mut total = 0;
    for section in sections {
        out.push('\n');
        out.push_str(&section.header());
        out.push('\n');
        for query in section.queries() {
            out.push_str(&format!("{}\n    {}\n", query.label(), query.query()));
            total += 1;
        }
    }
    out.push_str(&format!("\n{total} queries\n"));

    Some(out)
}
