use std::collections::HashSet;

use tablewright_core::{Project, Table, validate_column};

use crate::errors::{
    IssueSeverity, SchemaValidationResult, ValidationIssue, column_path, index_path, table_path,
};
use crate::naming::check_project_names;

/// Run structural, datatype and naming checks over a project.
///
/// Never fails: every problem becomes a finding in one of the buckets of
/// the returned result.
pub fn validate_for_export(project: &Project) -> SchemaValidationResult {
    let mut result = SchemaValidationResult::default();

    if project.tables.is_empty() {
        result.structural_errors.push(ValidationIssue::new(
            IssueSeverity::Error,
            "no_tables",
            "/tables",
            "no tables defined",
            Some("add at least one table".to_string()),
        ));
        return result;
    }

    validate_table_names(project, &mut result);
    for (table_index, table) in project.tables.iter().enumerate() {
        validate_table(table, table_index, &mut result);
    }

    let naming = check_project_names(project);
    result.naming_errors = naming.errors;
    result.naming_warnings = naming.warnings;

    tracing::debug!(
        event = "validation_finished",
        project = %project.name,
        structural_errors = result.structural_errors.len(),
        data_type_errors = result.data_type_errors.len(),
        naming_errors = result.naming_errors.len(),
        can_export = result.can_export_schema(),
    );

    result
}

fn validate_table_names(project: &Project, result: &mut SchemaValidationResult) {
    let mut seen = HashSet::new();
    for (table_index, table) in project.tables.iter().enumerate() {
        if !seen.insert(table.name.to_lowercase()) {
            result.structural_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                "duplicate_table_name",
                format!("{}/name", table_path(table_index)),
                format!("duplicate table name '{}'", table.name),
                Some("table names are compared case-insensitively".to_string()),
            ));
        }
    }
}

fn validate_table(table: &Table, table_index: usize, result: &mut SchemaValidationResult) {
    let base_path = table_path(table_index);

    if table.columns.is_empty() {
        result.structural_errors.push(ValidationIssue::new(
            IssueSeverity::Error,
            "no_columns",
            format!("{base_path}/columns"),
            format!("table '{}' has no columns", table.name),
            Some("add at least one column".to_string()),
        ));
        return;
    }

    let mut seen = HashSet::new();
    for (column_index, column) in table.columns.iter().enumerate() {
        if !seen.insert(column.name.to_lowercase()) {
            result.structural_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                "duplicate_column_name",
                format!("{}/name", column_path(table_index, column_index)),
                format!("duplicate column name '{}.{}'", table.name, column.name),
                Some("column names are compared case-insensitively".to_string()),
            ));
        }
    }

    let has_primary_key = table.has_primary_key();
    if !has_primary_key {
        result.structural_warnings.push(ValidationIssue::new(
            IssueSeverity::Warning,
            "no_primary_key",
            base_path.clone(),
            format!("table '{}' has no primary key", table.name),
            Some("mark at least one column as primary key".to_string()),
        ));
    }

    for (index_index, index) in table.indexes.iter().enumerate() {
        let index_base = index_path(table_index, index_index);

        if index.columns.is_empty() {
            result.structural_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                "index_without_columns",
                format!("{index_base}/columns"),
                format!("index '{}' on '{}' has no columns", index.name, table.name),
                None,
            ));
        }

        for (key_index, key) in index.columns.iter().enumerate() {
            if table.column(key.column_id).is_none() {
                result.structural_errors.push(ValidationIssue::new(
                    IssueSeverity::Error,
                    "unknown_index_column",
                    format!("{index_base}/columns/{key_index}"),
                    format!(
                        "index '{}' references column {} which is not in table '{}'",
                        index.name, key.column_id, table.name
                    ),
                    None,
                ));
            }
        }

        if index.is_clustered() && has_primary_key {
            result.structural_warnings.push(ValidationIssue::new(
                IssueSeverity::Warning,
                "clustered_index_with_primary_key",
                format!("{index_base}/type"),
                format!(
                    "clustered index '{}' conflicts with the clustered primary key of '{}'",
                    index.name, table.name
                ),
                Some("make the index NONCLUSTERED".to_string()),
            ));
        }
    }

    for (column_index, column) in table.columns.iter().enumerate() {
        let path = column_path(table_index, column_index);
        let report = validate_column(column);
        for finding in report.errors {
            result.data_type_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                finding.code,
                path.clone(),
                format!("{}: {}", table.name, finding.message),
                None,
            ));
        }
        for finding in report.warnings {
            result.data_type_warnings.push(ValidationIssue::new(
                IssueSeverity::Warning,
                finding.code,
                path.clone(),
                format!("{}: {}", table.name, finding.message),
                None,
            ));
        }

        if column.is_identity() && column.nullable() {
            result.data_type_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                "nullable_identity",
                format!("{path}/nullable"),
                format!(
                    "identity column '{}.{}' must not be nullable",
                    table.name, column.name
                ),
                None,
            ));
        }

        if column.is_primary_key() && column.nullable() {
            result.data_type_errors.push(ValidationIssue::new(
                IssueSeverity::Error,
                "nullable_primary_key",
                format!("{path}/nullable"),
                format!(
                    "primary key column '{}.{}' must not be nullable",
                    table.name, column.name
                ),
                None,
            ));
        }
    }
}
