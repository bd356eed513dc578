use tablewright_core::Project;
use tablewright_validate::SchemaValidationResult;

use super::table_status;
use crate::errors::Result;

const HEADER: [&str; 6] = [
    "name",
    "description",
    "columnCount",
    "indexCount",
    "primaryKeyColumns",
    "validationStatus",
];

/// Render one CSV row per table with its validation status.
pub fn render_csv(project: &Project, validation: &SchemaValidationResult) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for (table_index, table) in project.tables.iter().enumerate() {
        let keys: Vec<&str> = table
            .primary_key_columns()
            .into_iter()
            .map(|column| column.name.as_str())
            .collect();
        let column_count = table.columns.len().to_string();
        let index_count = table.indexes.len().to_string();
        let keys = keys.join(";");
        writer.write_record([
            table.name.as_str(),
            table.description.as_deref().unwrap_or(""),
            column_count.as_str(),
            index_count.as_str(),
            keys.as_str(),
            table_status(validation, table_index).as_str(),
        ])?;
    }

    writer.flush()?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
