//! Plain text formatting for terminal output:
//! - Status icons (○ ◐ ● ✓)
//! - Severity and type badges
//! - Fixed-width issue table rows

use std::fmt::Write as _;

use sqa_lib::view::{ProjectOverview, Summary, Tally};
use sqa_lib::{Category, Issue, Project, Severity, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open issue - waiting for work (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - being worked on (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Fixed - awaiting verification (filled circle).
    pub const FIXED: &str = "●";
    /// Closed - verified (checkmark).
    pub const CLOSED: &str = "✓";
}

const TITLE_WIDTH: usize = 48;

#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Fixed => icons::FIXED,
        Status::Closed => icons::CLOSED,
    }
}

/// Severity as a fixed-width label.
#[must_use]
pub fn format_severity(severity: Severity) -> String {
    format!("{:<8}", severity.as_str())
}

/// Truncate to `width` terminal columns, adding `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pad to `width` terminal columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{priority}] {severity} {date} {title}`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    format!(
        "{} {} [{}] {} {} {}",
        format_status_icon(issue.status),
        pad(&issue.id, 9),
        issue.priority,
        format_severity(issue.severity),
        issue.date_reported,
        truncate(&issue.title, TITLE_WIDTH),
    )
}

/// Multi-line detail view of one issue.
#[must_use]
pub fn format_issue_details(issue: &Issue) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        format_status_icon(issue.status),
        issue.id,
        issue.title
    );
    let _ = writeln!(
        out,
        "{} | {} | {} | {}",
        issue.test_type, issue.severity, issue.priority, issue.status
    );
    let _ = writeln!(out, "Reported:  {} by {}", issue.date_reported, issue.reporter);
    let _ = writeln!(out, "Page:      {}", issue.page_screen);
    let _ = writeln!(out, "Test case: {}", issue.test_case);

    let optional = [
        ("Assigned", issue.assigned_to.as_deref()),
        ("Browser", issue.browser_device.as_deref()),
        ("Screenshot", issue.screenshot_url.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "{:<10} {value}", format!("{label}:"));
        }
    }
    if let Some(fixed) = issue.date_fixed {
        let _ = writeln!(out, "Fixed:     {fixed}");
    }

    let sections = [
        ("Description", issue.description.as_deref()),
        ("Steps to reproduce", issue.steps_to_reproduce.as_deref()),
        ("Expected", issue.expected_behavior.as_deref()),
        ("Actual", issue.actual_behavior.as_deref()),
        ("Comments", issue.comments.as_deref()),
    ];
    for (heading, body) in sections {
        if let Some(body) = body {
            let _ = write!(out, "\n{heading}:\n{body}\n");
        }
    }
    out
}

/// One line per project on the overview.
#[must_use]
pub fn format_project_line(project: &Project, overview: &ProjectOverview, active: bool) -> String {
    let marker = if active { "*" } else { " " };
    format!(
        "{marker} {} {} [{}] [{}] {} issues, {}% closed",
        pad(&project.id, 12),
        pad(&truncate(&project.name, 28), 28),
        project.project_type,
        project.status,
        overview.total,
        overview.completion_percent,
    )
}

fn format_tally<C: Category>(heading: &str, tally: &Tally<C>) -> String {
    let mut out = format!("{heading}:\n");
    for (key, count) in tally.iter() {
        let _ = writeln!(out, "  {} {count:>4}", pad(key.as_str(), 20));
    }
    out
}

/// Dashboard cards: totals plus per-dimension counts.
#[must_use]
pub fn format_summary(project: &Project, summary: &Summary) -> String {
    let mut out = format!("{} ({})\n", project.name, project.id);
    let _ = writeln!(out, "Total issues: {}", summary.total);
    let _ = writeln!(
        out,
        "Open: {}  In Progress: {}  Fixed: {}  Closed: {}\n",
        summary.by_status[Status::Open],
        summary.by_status[Status::InProgress],
        summary.by_status[Status::Fixed],
        summary.by_status[Status::Closed],
    );
    out.push_str(&format_tally("By severity", &summary.by_severity));
    out.push('\n');
    out.push_str(&format_tally("By test type", &summary.by_test_type));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqa_lib::{Priority, TestType};

    fn make_test_issue() -> Issue {
        Issue {
            id: "UI-001".to_string(),
            title: "Test title".to_string(),
            reporter: "Alice".to_string(),
            page_screen: "Home".to_string(),
            test_case: "TC-1".to_string(),
            test_type: TestType::Ui,
            date_reported: chrono::NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(Status::Open), "○");
        assert_eq!(format_status_icon(Status::InProgress), "◐");
        assert_eq!(format_status_icon(Status::Fixed), "●");
        assert_eq!(format_status_icon(Status::Closed), "✓");
    }

    #[test]
    fn test_format_issue_line_open() {
        let line = format_issue_line(&make_test_issue());
        assert_eq!(line, "○ UI-001    [P2] Medium   2023-10-25 Test title");
    }

    #[test]
    fn test_format_issue_line_priority_and_status() {
        let mut issue = make_test_issue();
        issue.priority = Priority::P0;
        issue.status = Status::Closed;
        let line = format_issue_line(&issue);
        assert!(line.starts_with("✓"));
        assert!(line.contains("[P0]"));
    }

    #[test]
    fn test_truncate_respects_width() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        let cut = truncate("日本語のタイトル", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_details_skip_absent_fields() {
        let mut issue = make_test_issue();
        issue.assigned_to = Some("Bob".to_string());
        let details = format_issue_details(&issue);
        assert!(details.contains("Assigned:  Bob"));
        assert!(!details.contains("Browser:"));
        assert!(!details.contains("Description:"));
    }
}
