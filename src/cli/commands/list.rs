//! List command implementation.
//!
//! Primary discovery interface: the filtered, sorted issue table of the
//! active project.

use sqa_lib::{Result, derive_view};

use crate::cli::ListArgs;
use crate::config::Workspace;
use crate::format::{IssueList, format_issue_line, print_json};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if a filter or sort value is invalid.
pub fn execute(args: &ListArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let (filters, tab) = super::build_filters(&args.filters)?;
    let sort = super::resolve_sort(&args.sort, &workspace.config)?;

    let registry = workspace.open_registry();
    let Some(project) = super::active_or_notice(&registry, json)? else {
        return Ok(());
    };

    let mut view = derive_view(&project.issues, &filters, tab);
    sort.apply(&mut view.issues);
    if let Some(limit) = args.limit {
        view.issues.truncate(limit);
    }

    if json {
        return print_json(&IssueList {
            project_id: &project.id,
            total: view.summary.total,
            shown: view.issues.len(),
            issues: view.issues,
        });
    }

    if view.issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }
    for issue in &view.issues {
        println!("{}", format_issue_line(issue));
    }
    println!(
        "\n{} of {} issue(s) in {} [{tab}] sorted by {}",
        view.issues.len(),
        view.summary.total,
        project.name,
        sort.field
    );
    Ok(())
}
