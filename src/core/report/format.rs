//! Report line formatting

use crate::domain::QueryResult;

/// Number of leading profiles whose CRM ids are shown on a line
pub const SAMPLE_SIZE: usize = 5;

/// Appended to the id list when more profiles came back than were sampled
pub const MORE_MARKER: &str = "...";

/// CRM ids of the first [`SAMPLE_SIZE`] profiles, absent ids dropped
pub fn sample_ids(result: &QueryResult) -> Vec<&str> {
    result
        .profiles
        .iter()
        .take(SAMPLE_SIZE)
        .filter_map(|p| p.crm_id())
        .collect()
}

/// Formats one report line: `"{label}: {total}\t({ids})"`
///
/// Ids are comma-separated; when the sample was truncated the list ends with
/// [`MORE_MARKER`] inside the parentheses.
pub fn format_result_line(label: &str, result: &QueryResult) -> String {
    let mut ids = sample_ids(result).join(", ");
    if result.profiles.len() > SAMPLE_SIZE {
        if !ids.is_empty() {
            ids.push_str(", ");
        }
        ids.push_str(MORE_MARKER);
    }

    format!("{label}: {}\t({ids})", result.total_count_display())
}
