//! Error types for `sqa-lib`.

use thiserror::Error;

/// Primary error type for sqa-lib operations.
#[derive(Error, Debug)]
pub enum SqaError {
    // === Lookup Errors ===
    /// Issue with the specified ID was not found in the active project.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Project with the specified ID was not found.
    #[error("Project not found: {id}")]
    ProjectNotFound { id: String },

    /// An operation needed an active project but none is selected.
    #[error("No active project; create or select one first")]
    NoActiveProject,

    /// Attempted to add an issue with an ID that already exists.
    #[error("Issue ID collision: {id}")]
    IdCollision { id: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", join_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    /// A categorical value (status, severity, ...) could not be parsed.
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },

    // === Store Errors ===
    /// The key-value store holds a value that is not valid JSON for its key.
    #[error("Corrupt value for store key '{key}': {reason}")]
    CorruptValue { key: String, reason: String },

    /// The key-value store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    // === Export Errors ===
    /// Export was requested for an empty issue list.
    #[error("No issues to export")]
    NothingToExport,

    /// Spreadsheet writer failure.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV writer failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SqaError {
    #[must_use]
    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = &errors[0];
            Self::Validation {
                field: err.field.clone(),
                reason: err.message.clone(),
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// Field-level errors carried by this error, if it is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Vec<ValidationError> {
        match self {
            Self::Validation { field, reason } => vec![ValidationError::new(field, reason)],
            Self::ValidationErrors { errors } => errors.clone(),
            _ => Vec::new(),
        }
    }

    /// True for failures the user can fix by changing their input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::ValidationErrors { .. }
                | Self::InvalidValue { .. }
                | Self::NothingToExport
                | Self::NoActiveProject
                | Self::IdCollision { .. }
        )
    }
}

/// Result type using `SqaError`.
pub type Result<T> = std::result::Result<T, SqaError>;
