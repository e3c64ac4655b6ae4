//! Issue commands for the active project.

use sqa_lib::{Issue, Result, SqaError};
use tracing::debug;

use crate::cli::{IssueAddArgs, IssueFields, IssueSubcommand, IssueUpdateArgs};
use crate::config::Workspace;
use crate::format::{format_issue_details, print_json};

use super::{non_blank, parse_date};

/// Execute an issue subcommand.
///
/// # Errors
///
/// Returns an error if there is no active project, validation fails, or the
/// named issue does not exist.
pub fn execute(command: IssueSubcommand, workspace: &Workspace, json: bool) -> Result<()> {
    match command {
        IssueSubcommand::Add(args) => add(args, workspace, json),
        IssueSubcommand::Update(args) => update(args, workspace, json),
        IssueSubcommand::Delete { id } => delete(&id, workspace, json),
        IssueSubcommand::Show { id } => show(&id, workspace, json),
    }
}

/// Copy every provided flag onto `issue`. Blank optional values clear the field.
fn apply_fields(issue: &mut Issue, fields: IssueFields) -> Result<()> {
    if let Some(value) = fields.type_ {
        issue.test_type = value.parse()?;
    }
    if let Some(value) = fields.date {
        issue.date_reported = parse_date("date reported", &value)?;
    }
    if let Some(value) = fields.reporter {
        issue.reporter = value.trim().to_string();
    }
    if let Some(value) = fields.page {
        issue.page_screen = value.trim().to_string();
    }
    if let Some(value) = fields.test_case {
        issue.test_case = value.trim().to_string();
    }
    if let Some(value) = fields.severity {
        issue.severity = value.parse()?;
    }
    if let Some(value) = fields.priority {
        issue.priority = value.parse()?;
    }
    if let Some(value) = fields.status {
        issue.status = value.parse()?;
    }
    if let Some(value) = fields.fixed_date {
        issue.date_fixed = if value.trim().is_empty() {
            None
        } else {
            Some(parse_date("date fixed", &value)?)
        };
    }

    let optional = [
        (fields.description, &mut issue.description),
        (fields.steps, &mut issue.steps_to_reproduce),
        (fields.expected, &mut issue.expected_behavior),
        (fields.actual, &mut issue.actual_behavior),
        (fields.browser, &mut issue.browser_device),
        (fields.screenshot, &mut issue.screenshot_url),
        (fields.assignee, &mut issue.assigned_to),
        (fields.comments, &mut issue.comments),
    ];
    for (value, slot) in optional {
        if value.is_some() {
            *slot = non_blank(value);
        }
    }
    Ok(())
}

fn add(args: IssueAddArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let title = args.title.or(args.title_flag).unwrap_or_default();

    let mut draft = Issue {
        id: args.id.unwrap_or_default(),
        title: title.trim().to_string(),
        reporter: workspace.config.default_reporter.clone().unwrap_or_default(),
        ..Default::default()
    };
    apply_fields(&mut draft, args.fields)?;

    let mut registry = workspace.open_registry();
    let issue = registry.add_issue(draft)?.clone();
    super::warn_if_degraded(&registry);
    debug!(id = %issue.id, "Issue added");

    if json {
        print_json(&issue)
    } else {
        println!("Created {}: {}", issue.id, issue.title);
        Ok(())
    }
}

fn update(args: IssueUpdateArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let mut registry = workspace.open_registry();
    let mut issue = registry
        .active_project()
        .ok_or(SqaError::NoActiveProject)?
        .issue(&args.id)
        .cloned()
        .ok_or_else(|| SqaError::IssueNotFound { id: args.id.clone() })?;

    if let Some(title) = args.title {
        issue.title = title.trim().to_string();
    }
    apply_fields(&mut issue, args.fields)?;

    registry.update_issue(issue.clone())?;
    super::warn_if_degraded(&registry);

    if json {
        print_json(&issue)
    } else {
        println!("Updated {}: {}", issue.id, issue.title);
        Ok(())
    }
}

fn delete(id: &str, workspace: &Workspace, json: bool) -> Result<()> {
    let mut registry = workspace.open_registry();
    let deleted = registry.delete_issue(id)?;
    super::warn_if_degraded(&registry);

    if json {
        return print_json(&serde_json::json!({ "id": id, "deleted": deleted }));
    }
    if deleted {
        println!("Deleted {id}");
    } else {
        println!("No issue {id} in the active project; nothing deleted");
    }
    Ok(())
}

fn show(id: &str, workspace: &Workspace, json: bool) -> Result<()> {
    let registry = workspace.open_registry();
    let Some(project) = super::active_or_notice(&registry, json)? else {
        return Ok(());
    };
    let issue = project
        .issue(id)
        .ok_or_else(|| SqaError::IssueNotFound { id: id.to_string() })?;

    if json {
        print_json(issue)
    } else {
        print!("{}", format_issue_details(issue));
        Ok(())
    }
}
