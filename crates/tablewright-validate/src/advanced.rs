//! Optional heuristics. Findings here are informational and never affect
//! whether a schema can be exported.

use serde::Serialize;
use tablewright_core::{Column, Project, Table};

use crate::errors::{IssueSeverity, ValidationIssue, column_path, table_path};

const WIDE_TABLE_COLUMNS: usize = 50;
const UNINDEXED_TABLE_COLUMNS: usize = 5;
const LARGE_STRING_LENGTH: i32 = 4000;
const PASSWORD_HASH_LENGTH: i32 = 60;

/// Findings of the advanced pass, one list per concern.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct AdvancedReport {
    pub performance: Vec<ValidationIssue>,
    pub best_practice: Vec<ValidationIssue>,
    pub security: Vec<ValidationIssue>,
}

impl AdvancedReport {
    pub fn is_empty(&self) -> bool {
        self.performance.is_empty() && self.best_practice.is_empty() && self.security.is_empty()
    }

    pub fn len(&self) -> usize {
        self.performance.len() + self.best_practice.len() + self.security.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.performance
            .iter()
            .chain(self.best_practice.iter())
            .chain(self.security.iter())
    }
}

/// Run the performance, best-practice and security heuristics.
pub fn analyze(project: &Project) -> AdvancedReport {
    let mut report = AdvancedReport::default();

    for (table_index, table) in project.tables.iter().enumerate() {
        check_performance(table, table_index, &mut report.performance);
        check_best_practice(table, table_index, &mut report.best_practice);
        check_security(table, table_index, &mut report.security);
    }

    tracing::debug!(
        event = "advanced_analysis_finished",
        project = %project.name,
        findings = report.len(),
    );
    report
}

fn check_performance(table: &Table, table_index: usize, issues: &mut Vec<ValidationIssue>) {
    let base_path = table_path(table_index);
    let column_count = table.columns.len();

    if table.indexes.is_empty() && column_count > UNINDEXED_TABLE_COLUMNS {
        issues.push(warning(
            "unindexed_table",
            &base_path,
            format!(
                "table '{}' has {column_count} columns and no indexes",
                table.name
            ),
            Some("index the columns used for lookups"),
        ));
    }

    if column_count > WIDE_TABLE_COLUMNS {
        issues.push(warning(
            "wide_table",
            &base_path,
            format!("table '{}' has {column_count} columns", table.name),
            Some("consider splitting the table"),
        ));
    }

    for (column_index, column) in table.columns.iter().enumerate() {
        let large = column.data_type.is_some_and(|data_type| data_type.is_variable_string())
            && column
                .max_length
                .is_some_and(|length| length > LARGE_STRING_LENGTH);
        if large {
            issues.push(warning(
                "large_string_column",
                &column_path(table_index, column_index),
                format!(
                    "column '{}.{}' allows more than {LARGE_STRING_LENGTH} characters",
                    table.name, column.name
                ),
                None,
            ));
        }
    }

    if !table.has_clustered_index() && !table.has_primary_key() {
        issues.push(warning(
            "heap_table",
            &base_path,
            format!(
                "table '{}' has neither a clustered index nor a primary key",
                table.name
            ),
            Some("add a primary key or a clustered index"),
        ));
    }
}

fn check_best_practice(table: &Table, table_index: usize, issues: &mut Vec<ValidationIssue>) {
    let base_path = table_path(table_index);

    let missing: Vec<&str> = ["created", "updated"]
        .into_iter()
        .filter(|needle| !table.columns.iter().any(|column| name_contains(column, needle)))
        .collect();
    if !missing.is_empty() {
        issues.push(warning(
            "missing_audit_columns",
            &base_path,
            format!(
                "table '{}' has no {} audit column",
                table.name,
                missing.join("/")
            ),
            Some("add created_at/updated_at columns"),
        ));
    }

    let has_id_key = table
        .primary_key_columns()
        .iter()
        .any(|column| column.name.eq_ignore_ascii_case("id"));
    if !has_id_key {
        issues.push(warning(
            "primary_key_not_id",
            &base_path,
            format!("table '{}' has no primary key column named 'id'", table.name),
            None,
        ));
    }

    for (column_index, column) in table.columns.iter().enumerate() {
        let lower = column.name.to_lowercase();
        if lower == "id" || !lower.ends_with("_id") {
            continue;
        }
        let integer = column.data_type.is_some_and(|data_type| data_type.is_integer());
        if !integer {
            issues.push(warning(
                "non_integer_reference",
                &column_path(table_index, column_index),
                format!(
                    "column '{}.{}' looks like a reference but is not an integer type",
                    table.name, column.name
                ),
                Some("use the key type of the referenced table"),
            ));
        }
    }
}

fn check_security(table: &Table, table_index: usize, issues: &mut Vec<ValidationIssue>) {
    for (column_index, column) in table.columns.iter().enumerate() {
        let path = column_path(table_index, column_index);

        if name_contains(column, "password") || name_contains(column, "pwd") {
            let string = column.data_type.is_some_and(|data_type| data_type.is_string());
            let short = column
                .max_length
                .is_some_and(|length| length < PASSWORD_HASH_LENGTH);
            if !string || short {
                issues.push(warning(
                    "weak_password_column",
                    &path,
                    format!(
                        "column '{}.{}' cannot hold a password hash",
                        table.name, column.name
                    ),
                    Some("store hashes in a string column of at least 60 characters"),
                ));
            }
        }

        let personal = ["email", "phone", "ssn"]
            .iter()
            .any(|needle| name_contains(column, needle));
        if personal && column.nullable() {
            issues.push(ValidationIssue::new(
                IssueSeverity::Info,
                "nullable_personal_data",
                path,
                format!(
                    "column '{}.{}' holds personal data and is nullable",
                    table.name, column.name
                ),
                None,
            ));
        }
    }
}

fn name_contains(column: &Column, needle: &str) -> bool {
    column.name.to_lowercase().contains(needle)
}

fn warning(code: &str, path: &str, message: String, hint: Option<&str>) -> ValidationIssue {
    ValidationIssue::new(
        IssueSeverity::Warning,
        code,
        path,
        message,
        hint.map(str::to_string),
    )
}
