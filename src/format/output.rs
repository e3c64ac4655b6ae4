use serde::Serialize;
use sqa_lib::view::{ProjectOverview, Summary};
use sqa_lib::{Issue, Project, ProjectStatus, ProjectType};

/// Issue table for the list view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList<'a> {
    pub project_id: &'a str,
    /// Size of the unfiltered issue list.
    pub total: usize,
    pub shown: usize,
    pub issues: Vec<&'a Issue>,
}

/// Project card for the projects overview.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard<'a> {
    #[serde(flatten)]
    pub overview: ProjectOverview,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub created_date: chrono::NaiveDate,
    pub team_size: u32,
    pub status: ProjectStatus,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub active: bool,
}

impl<'a> ProjectCard<'a> {
    #[must_use]
    pub fn new(project: &'a Project, active: bool) -> Self {
        Self {
            overview: ProjectOverview::from_project(project),
            description: project.description.as_deref(),
            created_date: project.created_date,
            team_size: project.team_size,
            status: project.status,
            project_type: project.project_type,
            active,
        }
    }
}

/// Dashboard counts for one project.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport<'a> {
    pub project_id: &'a str,
    pub project_name: &'a str,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Result of an export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: String,
    pub format: String,
    pub rows: usize,
}
