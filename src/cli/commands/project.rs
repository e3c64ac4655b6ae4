//! Project commands: the projects overview and project settings.

use sqa_lib::view::ProjectOverview;
use sqa_lib::{NewProject, ProjectType, Result, SqaError};

use crate::cli::{ProjectCreateArgs, ProjectListArgs, ProjectSubcommand, ProjectUpdateArgs};
use crate::config::Workspace;
use crate::format::{ProjectCard, format_project_line, print_json};

/// Execute a project subcommand.
///
/// # Errors
///
/// Returns an error if validation fails or a named project does not exist.
pub fn execute(command: ProjectSubcommand, workspace: &Workspace, json: bool) -> Result<()> {
    match command {
        ProjectSubcommand::List(args) => list(&args, workspace, json),
        ProjectSubcommand::Create(args) => create(args, workspace, json),
        ProjectSubcommand::Select { id } => select(&id, workspace, json),
        ProjectSubcommand::Show { id } => show(id.as_deref(), workspace, json),
        ProjectSubcommand::Update(args) => update(args, workspace, json),
        ProjectSubcommand::Archive { id } => archive(&id, workspace, json),
    }
}

fn list(args: &ProjectListArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let registry = workspace.open_registry();
    let active = registry.active_project_id();
    let projects: Vec<_> = registry
        .search_projects(args.search.as_deref().unwrap_or(""))
        .into_iter()
        .filter(|p| args.all || !p.is_archived())
        .collect();

    if json {
        let cards: Vec<ProjectCard<'_>> = projects
            .iter()
            .map(|p| ProjectCard::new(p, active == Some(p.id.as_str())))
            .collect();
        return print_json(&cards);
    }

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }
    for project in &projects {
        let overview = ProjectOverview::from_project(project);
        let is_active = active == Some(project.id.as_str());
        println!("{}", format_project_line(project, &overview, is_active));
    }
    println!("\n{} project(s)", projects.len());
    Ok(())
}

fn parse_type(value: Option<&str>) -> Result<Option<ProjectType>> {
    value.map(str::parse::<ProjectType>).transpose()
}

fn create(args: ProjectCreateArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let draft = NewProject {
        name: args.name,
        description: super::non_blank(args.description),
        team_size: args.team_size,
        project_type: parse_type(args.type_.as_deref())?.unwrap_or_default(),
    };

    let mut registry = workspace.open_registry();
    let project = registry.add_project(draft)?.clone();
    super::warn_if_degraded(&registry);

    if json {
        print_json(&ProjectCard::new(&project, true))
    } else {
        println!("Created project {}: {}", project.id, project.name);
        Ok(())
    }
}

fn select(id: &str, workspace: &Workspace, json: bool) -> Result<()> {
    let mut registry = workspace.open_registry();
    let name = registry
        .project(id)
        .map(|p| p.name.clone())
        .ok_or_else(|| SqaError::ProjectNotFound { id: id.to_string() })?;
    registry.select_project(id);
    super::warn_if_degraded(&registry);

    if json {
        print_json(&serde_json::json!({ "activeProjectId": id, "name": name }))
    } else {
        println!("Active project: {name} ({id})");
        Ok(())
    }
}

fn show(id: Option<&str>, workspace: &Workspace, json: bool) -> Result<()> {
    let registry = workspace.open_registry();
    let project = match id {
        Some(id) => registry
            .project(id)
            .ok_or_else(|| SqaError::ProjectNotFound { id: id.to_string() })?,
        None => match super::active_or_notice(&registry, json)? {
            Some(project) => project,
            None => return Ok(()),
        },
    };
    let active = registry.active_project_id() == Some(project.id.as_str());
    let card = ProjectCard::new(project, active);

    if json {
        return print_json(&card);
    }

    println!("{} ({}){}", project.name, project.id, if active { " *active*" } else { "" });
    if let Some(description) = &project.description {
        println!("{description}");
    }
    println!(
        "Type: {}  Status: {}  Team size: {}  Created: {}",
        project.project_type, project.status, project.team_size, project.created_date
    );
    let by_status: Vec<String> = card
        .overview
        .by_status
        .iter()
        .map(|(status, count)| format!("{status}: {count}"))
        .collect();
    println!(
        "Issues: {} ({})  Completion: {}%",
        card.overview.total,
        by_status.join(", "),
        card.overview.completion_percent
    );
    Ok(())
}

fn update(args: ProjectUpdateArgs, workspace: &Workspace, json: bool) -> Result<()> {
    let mut registry = workspace.open_registry();
    let mut project = registry
        .project(&args.id)
        .cloned()
        .ok_or_else(|| SqaError::ProjectNotFound { id: args.id.clone() })?;

    if let Some(name) = args.name {
        project.name = name;
    }
    if let Some(description) = args.description {
        project.description = super::non_blank(Some(description));
    }
    if let Some(team_size) = args.team_size {
        project.team_size = team_size;
    }
    if let Some(project_type) = parse_type(args.type_.as_deref())? {
        project.project_type = project_type;
    }

    registry.update_project(project)?;
    super::warn_if_degraded(&registry);

    let active = registry.active_project_id() == Some(args.id.as_str());
    let Some(updated) = registry.project(&args.id) else {
        return Err(SqaError::ProjectNotFound { id: args.id });
    };
    if json {
        print_json(&ProjectCard::new(updated, active))
    } else {
        println!("Updated project {}: {}", updated.id, updated.name);
        Ok(())
    }
}

fn archive(id: &str, workspace: &Workspace, json: bool) -> Result<()> {
    let mut registry = workspace.open_registry();
    if !registry.archive_project(id) {
        return Err(SqaError::ProjectNotFound { id: id.to_string() });
    }
    super::warn_if_degraded(&registry);

    if json {
        print_json(&serde_json::json!({ "id": id, "status": "Archived" }))
    } else {
        println!("Archived project {id}");
        Ok(())
    }
}
