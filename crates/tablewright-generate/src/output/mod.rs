//! Document renderers. Each one consumes a project plus its validation
//! result and never validates on its own.

pub mod csv;
pub mod html;
pub mod json;
pub mod markdown;

use tablewright_core::{Column, Index, Table, render_column_type};
use tablewright_validate::{SchemaValidationResult, ValidationIssue};

/// Per-table outcome shown by the tabular exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Ok,
    Warning,
    Error,
}

impl TableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TableStatus::Ok => "OK",
            TableStatus::Warning => "WARNING",
            TableStatus::Error => "ERROR",
        }
    }
}

/// Status of the table at `table_index`: blocking errors first, then any
/// other finding under the table path.
pub fn table_status(validation: &SchemaValidationResult, table_index: usize) -> TableStatus {
    if validation
        .blocking_errors()
        .any(|issue| issue.concerns_table(table_index))
    {
        return TableStatus::Error;
    }
    let advisory = validation
        .warnings()
        .chain(validation.naming_errors.iter())
        .any(|issue| issue.concerns_table(table_index));
    if advisory {
        TableStatus::Warning
    } else {
        TableStatus::Ok
    }
}

/// Blocking finding groups listed by the error reports.
pub(crate) fn blocking_sections(
    validation: &SchemaValidationResult,
) -> [(&'static str, &[ValidationIssue]); 2] {
    [
        ("Structural errors", validation.structural_errors.as_slice()),
        ("Data type errors", validation.data_type_errors.as_slice()),
    ]
}

pub(crate) fn type_label(column: &Column) -> String {
    render_column_type(column).unwrap_or_else(|_| "UNDEFINED".to_string())
}

pub(crate) fn index_keys(table: &Table, index: &Index) -> Vec<String> {
    index
        .columns
        .iter()
        .map(|key| match table.column(key.column_id) {
            Some(column) => format!("{} {}", column.name, key.sort_order.as_sql()),
            None => format!("{} (missing)", key.column_id),
        })
        .collect()
}

pub(crate) fn key_marker(column: &Column) -> &'static str {
    match (column.is_primary_key(), column.is_identity()) {
        (true, true) => "PK, IDENTITY",
        (true, false) => "PK",
        (false, true) => "IDENTITY",
        (false, false) => "",
    }
}
