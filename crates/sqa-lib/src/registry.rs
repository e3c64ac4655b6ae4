//! Project registry: the authoritative project collection and active
//! project selection, persisted through a [`KeyValueStore`].

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::{Result, SqaError};
use crate::kv::{ACTIVE_PROJECT_KEY, KeyValueStore, PROJECTS_KEY};
use crate::model::{Issue, NewProject, Project, ProjectStatus};
use crate::seed;
use crate::util::{generate_project_id, next_issue_id, today};
use crate::validation::{IssueValidator, ProjectValidator};

/// Owns every project and the active selection.
///
/// Each mutation writes through to the store. When the store cannot be read
/// or written the registry switches to degraded mode: it keeps serving the
/// in-memory state and stops writing, so a store it could not read is never
/// overwritten.
pub struct ProjectRegistry<S: KeyValueStore> {
    store: S,
    projects: Vec<Project>,
    active_id: Option<String>,
    degraded: bool,
}

impl<S: KeyValueStore> ProjectRegistry<S> {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Hydrate from `store`, seeding the demo projects if it holds none.
    #[must_use]
    pub fn open(store: S) -> Self {
        Self::open_with_seed(store, seed::demo_projects())
    }

    /// Hydrate from `store`, seeding `seed` if it holds no projects key.
    #[must_use]
    pub fn open_with_seed(store: S, seed: Vec<Project>) -> Self {
        let mut registry = Self {
            store,
            projects: Vec::new(),
            active_id: None,
            degraded: false,
        };

        match registry.load_projects() {
            Ok(Some(projects)) => registry.projects = projects,
            Ok(None) => {
                info!(count = seed.len(), "Seeding empty store with demo projects");
                registry.projects = seed;
                registry.persist_projects();
            }
            Err(e) => {
                registry.enter_degraded(&e);
                registry.projects = seed;
            }
        }

        let saved_active = if registry.degraded {
            None
        } else {
            match registry.store.get(ACTIVE_PROJECT_KEY) {
                Ok(value) => value.filter(|id| !id.trim().is_empty()),
                Err(e) => {
                    registry.enter_degraded(&e);
                    None
                }
            }
        };

        match saved_active {
            Some(id) => registry.active_id = Some(id),
            None => {
                registry.active_id = registry.projects.first().map(|p| p.id.clone());
                registry.persist_active();
            }
        }

        debug!(
            projects = registry.projects.len(),
            active = ?registry.active_id,
            degraded = registry.degraded,
            "Registry opened"
        );
        registry
    }

    fn load_projects(&self) -> Result<Option<Vec<Project>>> {
        let Some(raw) = self.store.get(PROJECTS_KEY)? else {
            return Ok(None);
        };
        let projects = serde_json::from_str(&raw).map_err(|e| SqaError::CorruptValue {
            key: PROJECTS_KEY.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Some(projects))
    }

    fn enter_degraded(&mut self, cause: &SqaError) {
        if !self.degraded {
            warn!(error = %cause, "Store unavailable; continuing in memory without saving");
        }
        self.degraded = true;
    }

    fn persist_projects(&mut self) {
        if self.degraded {
            return;
        }
        let written = serde_json::to_string(&self.projects)
            .map_err(SqaError::from)
            .and_then(|json| self.store.set(PROJECTS_KEY, &json));
        if let Err(e) = written {
            self.enter_degraded(&e);
        }
    }

    fn persist_active(&mut self) {
        if self.degraded {
            return;
        }
        let value = self.active_id.clone().unwrap_or_default();
        if let Err(e) = self.store.set(ACTIVE_PROJECT_KEY, &value) {
            self.enter_degraded(&e);
        }
    }

    /// True once a store read or write has failed.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    // ========================================================================
    // Projects
    // ========================================================================

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn active_project_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// The project the active ID points at, if it exists.
    #[must_use]
    pub fn active_project(&self) -> Option<&Project> {
        self.active_id.as_deref().and_then(|id| self.project(id))
    }

    fn active_index(&self) -> Result<usize> {
        let id = self.active_id.as_deref().ok_or(SqaError::NoActiveProject)?;
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(SqaError::NoActiveProject)
    }

    /// Create a project and make it active.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or the team size is
    /// zero. The collection is left unchanged in that case.
    pub fn add_project(&mut self, draft: NewProject) -> Result<&Project> {
        ProjectValidator::validate_new(&draft).map_err(SqaError::from_validation_errors)?;

        let name = draft.name.trim().to_string();
        let description = draft
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let id = generate_project_id(
            &name,
            description.as_deref(),
            Utc::now(),
            |candidate| self.projects.iter().any(|p| p.id == candidate),
        );

        debug!(id = %id, name = %name, "Creating project");
        self.projects.push(Project {
            id: id.clone(),
            name,
            description,
            created_date: today(),
            team_size: draft.team_size,
            status: ProjectStatus::Active,
            project_type: draft.project_type,
            issues: Vec::new(),
        });
        self.active_id = Some(id);
        self.persist_projects();
        self.persist_active();

        let index = self.projects.len() - 1;
        Ok(&self.projects[index])
    }

    /// Point the active selection at `id`. Existence is not checked.
    pub fn select_project(&mut self, id: &str) {
        debug!(id, "Selecting project");
        let id = id.trim();
        self.active_id = (!id.is_empty()).then(|| id.to_string());
        self.persist_active();
    }

    /// Replace the project with the same ID. Returns `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the replacement is invalid.
    pub fn update_project(&mut self, mut project: Project) -> Result<bool> {
        ProjectValidator::validate(&project).map_err(SqaError::from_validation_errors)?;

        let Some(slot) = self.projects.iter_mut().find(|p| p.id == project.id) else {
            debug!(id = %project.id, "Update for unknown project ignored");
            return Ok(false);
        };
        project.name = project.name.trim().to_string();
        debug!(id = %project.id, "Updating project");
        *slot = project;
        self.persist_projects();
        Ok(true)
    }

    /// Mark a project archived. Returns `false` if none matched.
    pub fn archive_project(&mut self, id: &str) -> bool {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        debug!(id, "Archiving project");
        project.status = ProjectStatus::Archived;
        self.persist_projects();
        true
    }

    /// Case-insensitive substring search over project names and descriptions.
    #[must_use]
    pub fn search_projects(&self, term: &str) -> Vec<&Project> {
        let needle = term.trim().to_lowercase();
        self.projects
            .iter()
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description
                        .as_ref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect()
    }

    // ========================================================================
    // Issues (scoped to the active project)
    // ========================================================================

    fn all_issues(&self) -> impl Iterator<Item = &Issue> {
        self.projects.iter().flat_map(|p| p.issues.iter())
    }

    /// Add an issue to the active project.
    ///
    /// An empty draft ID is replaced with the next sequential ID for the
    /// issue's test type.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveProject` if nothing is selected, a validation error
    /// for missing required fields, or `IdCollision` for a duplicate ID.
    pub fn add_issue(&mut self, mut issue: Issue) -> Result<&Issue> {
        let index = self.active_index()?;
        IssueValidator::check(&issue)?;

        issue.id = issue.id.trim().to_string();
        if issue.id.is_empty() {
            issue.id = next_issue_id(issue.test_type, self.all_issues());
        } else if self.all_issues().any(|existing| existing.id == issue.id) {
            return Err(SqaError::IdCollision { id: issue.id });
        }
        issue.project_id.clone_from(&self.projects[index].id);

        debug!(id = %issue.id, project = %issue.project_id, "Adding issue");
        self.projects[index].issues.push(issue);
        self.persist_projects();

        let issues = &self.projects[index].issues;
        Ok(&issues[issues.len() - 1])
    }

    /// Replace the issue with the same ID in the active project.
    /// Returns `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveProject` if nothing is selected or a validation error.
    pub fn update_issue(&mut self, mut issue: Issue) -> Result<bool> {
        let index = self.active_index()?;

        let project = &mut self.projects[index];
        let Some(slot) = project.issues.iter_mut().find(|i| i.id == issue.id) else {
            debug!(id = %issue.id, "Update for unknown issue ignored");
            return Ok(false);
        };
        IssueValidator::check_update(slot, &issue)?;
        issue.project_id.clone_from(&project.id);
        debug!(id = %issue.id, "Updating issue");
        *slot = issue;
        self.persist_projects();
        Ok(true)
    }

    /// Remove an issue from the active project. Returns `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveProject` if nothing is selected.
    pub fn delete_issue(&mut self, id: &str) -> Result<bool> {
        let index = self.active_index()?;
        let issues = &mut self.projects[index].issues;
        let before = issues.len();
        issues.retain(|issue| issue.id != id);
        if issues.len() == before {
            return Ok(false);
        }
        debug!(id, "Deleted issue");
        self.persist_projects();
        Ok(true)
    }
}
