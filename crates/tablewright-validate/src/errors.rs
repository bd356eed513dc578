use serde::Serialize;
use thiserror::Error;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// Structured validation issue with location and hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(
        severity: IssueSeverity,
        code: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        Self {
            severity,
            code: code.into(),
            path: path.into(),
            message: message.into(),
            hint,
        }
    }

    /// Whether the issue points at the table at `table_index` or below it.
    pub fn concerns_table(&self, table_index: usize) -> bool {
        let base = table_path(table_index);
        self.path == base
            || self
                .path
                .strip_prefix(&base)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

pub(crate) fn table_path(table_index: usize) -> String {
    format!("/tables/{table_index}")
}

pub(crate) fn column_path(table_index: usize, column_index: usize) -> String {
    format!("/tables/{table_index}/columns/{column_index}")
}

pub(crate) fn index_path(table_index: usize, index_index: usize) -> String {
    format!("/tables/{table_index}/indexes/{index_index}")
}

/// Categorized findings of [`validate_for_export`](crate::validate_for_export).
///
/// Structural and datatype errors block generation. Naming findings are
/// advisory.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaValidationResult {
    pub structural_errors: Vec<ValidationIssue>,
    pub structural_warnings: Vec<ValidationIssue>,
    pub data_type_errors: Vec<ValidationIssue>,
    pub data_type_warnings: Vec<ValidationIssue>,
    pub naming_errors: Vec<ValidationIssue>,
    pub naming_warnings: Vec<ValidationIssue>,
}

impl SchemaValidationResult {
    /// Returns true when no blocking finding was recorded.
    pub fn can_export_schema(&self) -> bool {
        self.structural_errors.is_empty() && self.data_type_errors.is_empty()
    }

    pub fn total_errors(&self) -> usize {
        self.structural_errors.len() + self.data_type_errors.len() + self.naming_errors.len()
    }

    pub fn total_warnings(&self) -> usize {
        self.structural_warnings.len() + self.data_type_warnings.len() + self.naming_warnings.len()
    }

    /// Structural errors followed by datatype errors.
    pub fn blocking_errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.structural_errors
            .iter()
            .chain(self.data_type_errors.iter())
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.blocking_errors().chain(self.naming_errors.iter())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.structural_warnings
            .iter()
            .chain(self.data_type_warnings.iter())
            .chain(self.naming_warnings.iter())
    }
}

/// Errors raised while reading a project document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("project document has {} violation(s)", .0.len())]
    Invalid(Vec<ValidationIssue>),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;
