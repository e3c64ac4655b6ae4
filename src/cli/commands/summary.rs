use sqa_lib::{Result, Summary};

use crate::config::Workspace;
use crate::format::{SummaryReport, format_summary, print_json};

/// Execute the summary command (dashboard counts for the active project).
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub fn execute(workspace: &Workspace, json: bool) -> Result<()> {
    let registry = workspace.open_registry();
    let Some(project) = super::active_or_notice(&registry, json)? else {
        return Ok(());
    };
    let summary = Summary::from_issues(&project.issues);

    if json {
        print_json(&SummaryReport {
            project_id: &project.id,
            project_name: &project.name,
            summary,
        })
    } else {
        print!("{}", format_summary(project, &summary));
        Ok(())
    }
}
