use serde::Serialize;
use tablewright_core::{Project, Table, render_column_type};
use tablewright_validate::SchemaValidationResult;

use super::index_keys;
use crate::errors::Result;

#[derive(Debug, Serialize)]
struct Document<'a> {
    project: ProjectDocument<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectDocument<'a> {
    name: &'a str,
    description: Option<&'a str>,
    generated_at: &'a str,
    validation: ValidationSummary,
    tables: Vec<TableDocument<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationSummary {
    total_errors: usize,
    total_warnings: usize,
    can_export: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableDocument<'a> {
    name: &'a str,
    description: Option<&'a str>,
    columns: Vec<ColumnDocument<'a>>,
    indexes: Vec<IndexDocument<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnDocument<'a> {
    name: &'a str,
    data_type: Option<&'static str>,
    sql_type: Option<String>,
    nullable: bool,
    primary_key: bool,
    identity: bool,
    default_value: Option<&'a str>,
    description: Option<&'a str>,
    order_index: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexDocument<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    index_type: &'static str,
    unique: bool,
    columns: Vec<String>,
}

/// Render the project and its validation summary as pretty-printed JSON.
pub fn render_json(
    project: &Project,
    validation: &SchemaValidationResult,
    generated_at: &str,
) -> Result<String> {
    let document = Document {
        project: ProjectDocument {
            name: &project.name,
            description: project.description.as_deref(),
            generated_at,
            validation: ValidationSummary {
                total_errors: validation.total_errors(),
                total_warnings: validation.total_warnings(),
                can_export: validation.can_export_schema(),
            },
            tables: project.tables.iter().map(table_document).collect(),
        },
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn table_document(table: &Table) -> TableDocument<'_> {
    TableDocument {
        name: &table.name,
        description: table.description.as_deref(),
        columns: table
            .ordered_columns()
            .into_iter()
            .map(|column| ColumnDocument {
                name: &column.name,
                data_type: column.data_type.map(|data_type| data_type.name()),
                sql_type: render_column_type(column).ok(),
                nullable: column.nullable(),
                primary_key: column.is_primary_key(),
                identity: column.is_identity(),
                default_value: column.default_value.as_deref(),
                description: column.description.as_deref(),
                order_index: column.order_index,
            })
            .collect(),
        indexes: table
            .indexes
            .iter()
            .map(|index| IndexDocument {
                name: &index.name,
                index_type: index.index_type.as_sql(),
                unique: index.unique,
                columns: index_keys(table, index),
            })
            .collect(),
    }
}
