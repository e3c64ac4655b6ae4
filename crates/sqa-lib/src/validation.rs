//! Form-boundary validation for projects and issues.
//!
//! Validators collect every violation instead of stopping at the first one,
//! so a caller can report all bad fields together.

use crate::error::{SqaError, ValidationError};
use crate::model::{Issue, NewProject, Project};

const MAX_NAME_LEN: usize = 200;
const MAX_TITLE_LEN: usize = 500;
const MAX_TEXT_LEN: usize = 102_400;

/// Validates issue fields before they reach the registry.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a new issue and return all validation errors found.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(issue: &Issue) -> Result<(), Vec<ValidationError>> {
        Self::validate_against(None, issue)
    }

    /// Validate an edit of `previous`.
    ///
    /// The fix-date ordering rule only applies when one of the two dates
    /// changes, so an older record that breaks it stays editable.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_update(previous: &Issue, issue: &Issue) -> Result<(), Vec<ValidationError>> {
        Self::validate_against(Some(previous), issue)
    }

    fn validate_against(
        previous: Option<&Issue>,
        issue: &Issue,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("title", &issue.title),
            ("reporter", &issue.reporter),
            ("page_screen", &issue.page_screen),
            ("test_case", &issue.test_case),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(field, "is required"));
            }
        }

        if issue.title.len() > MAX_TITLE_LEN {
            errors.push(ValidationError::new("title", "exceeds 500 characters"));
        }

        if issue.id.chars().any(char::is_whitespace) {
            errors.push(ValidationError::new("id", "cannot contain whitespace"));
        }

        for (field, value) in [
            ("description", &issue.description),
            ("steps_to_reproduce", &issue.steps_to_reproduce),
            ("expected_behavior", &issue.expected_behavior),
            ("actual_behavior", &issue.actual_behavior),
            ("comments", &issue.comments),
        ] {
            if value.as_ref().is_some_and(|text| text.len() > MAX_TEXT_LEN) {
                errors.push(ValidationError::new(field, "exceeds 100KB"));
            }
        }

        let dates_changed = previous.is_none_or(|old| {
            old.date_fixed != issue.date_fixed || old.date_reported != issue.date_reported
        });
        if let Some(fixed) = issue.date_fixed.filter(|_| dates_changed) {
            if fixed < issue.date_reported {
                errors.push(ValidationError::new(
                    "date_fixed",
                    "cannot be before date_reported",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Same as [`validate`](Self::validate), folded into one `SqaError`.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing every violated rule.
    pub fn check(issue: &Issue) -> Result<(), SqaError> {
        Self::validate(issue).map_err(SqaError::from_validation_errors)
    }

    /// Same as [`validate_update`](Self::validate_update), folded into one `SqaError`.
    ///
    /// # Errors
    ///
    /// Returns a validation error describing every violated rule.
    pub fn check_update(previous: &Issue, issue: &Issue) -> Result<(), SqaError> {
        Self::validate_update(previous, issue).map_err(SqaError::from_validation_errors)
    }
}

/// Validates project fields.
pub struct ProjectValidator;

impl ProjectValidator {
    /// Validate a project draft.
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate_new(draft: &NewProject) -> Result<(), Vec<ValidationError>> {
        finish(check_fields(&draft.name, draft.team_size))
    }

    /// Validate a full project record (used on update).
    ///
    /// # Errors
    ///
    /// Returns a `Vec<ValidationError>` if any validation rules are violated.
    pub fn validate(project: &Project) -> Result<(), Vec<ValidationError>> {
        let mut errors = check_fields(&project.name, project.team_size);
        if project.id.trim().is_empty() {
            errors.push(ValidationError::new("id", "cannot be empty"));
        }
        finish(errors)
    }
}

fn check_fields(name: &str, team_size: u32) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let name = name.trim();
    if name.is_empty() {
        errors.push(ValidationError::new("name", "is required"));
    }
    if name.len() > MAX_NAME_LEN {
        errors.push(ValidationError::new("name", "exceeds 200 characters"));
    }
    if team_size == 0 {
        errors.push(ValidationError::new("team_size", "must be at least 1"));
    }
    errors
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
