//! Output formatting for `sqa`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`IssueList`] - Filtered issue table (list)
//! - [`ProjectCard`] - Project with counts and completion (project list/show)
//! - [`SummaryReport`] - Dashboard counts (summary)
//! - [`ExportReport`] - Written file (export)

mod output;
mod text;

pub use output::{ExportReport, IssueList, ProjectCard, SummaryReport};
pub use text::{
    format_issue_details, format_issue_line, format_project_line, format_severity,
    format_status_icon, format_summary, truncate,
};

use serde::Serialize;
use sqa_lib::Result;

/// Print `value` as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
