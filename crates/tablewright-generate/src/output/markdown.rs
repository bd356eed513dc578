use tablewright_core::Project;
use tablewright_validate::SchemaValidationResult;

use super::{blocking_sections, index_keys, key_marker, type_label};
use crate::ddl::single_line;

/// Render project documentation as Markdown.
///
/// `script` is embedded as a fenced block; pass `None` when the project is
/// not exportable and the blocking findings are listed instead.
pub fn render_markdown(
    project: &Project,
    validation: &SchemaValidationResult,
    script: Option<&str>,
    generated_at: &str,
) -> String {
    let mut lines = Vec::new();
    lines.push(format!("# {}", escape_markdown(&project.name)));
    lines.push(String::new());
    if let Some(description) = project.description.as_deref().filter(|text| !text.trim().is_empty()) {
        lines.push(escape_markdown(description));
        lines.push(String::new());
    }
    lines.push(format!("_Generated: {generated_at}_"));
    lines.push(String::new());

    lines.push("## Validation".to_string());
    lines.push(String::new());
    lines.push(format!("- Errors: {}", validation.total_errors()));
    lines.push(format!("- Warnings: {}", validation.total_warnings()));
    lines.push(format!(
        "- Exportable: {}",
        if validation.can_export_schema() { "yes" } else { "no" }
    ));
    lines.push(String::new());

    lines.push("## Tables".to_string());
    lines.push(String::new());
    lines.push("| Table | Columns | Indexes | Description |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for table in &project.tables {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            escape_markdown(&table.name),
            table.columns.len(),
            table.indexes.len(),
            escape_markdown(table.description.as_deref().unwrap_or(""))
        ));
    }
    lines.push(String::new());

    for table in &project.tables {
        lines.push(format!("## {}", escape_markdown(&table.name)));
        lines.push(String::new());
        if let Some(description) = table.description.as_deref().filter(|text| !text.trim().is_empty()) {
            lines.push(escape_markdown(description));
            lines.push(String::new());
        }

        lines.push("| Column | Type | Nullable | Key | Default | Description |".to_string());
        lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
        for column in table.ordered_columns() {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} |",
                escape_markdown(&column.name),
                type_label(column),
                if column.nullable() { "YES" } else { "NO" },
                key_marker(column),
                escape_markdown(column.default_value.as_deref().unwrap_or("")),
                escape_markdown(column.description.as_deref().unwrap_or(""))
            ));
        }
        lines.push(String::new());

        if !table.indexes.is_empty() {
            lines.push("### Indexes".to_string());
            lines.push(String::new());
            lines.push("| Index | Type | Unique | Columns |".to_string());
            lines.push("| --- | --- | --- | --- |".to_string());
            for index in &table.indexes {
                lines.push(format!(
                    "| {} | {} | {} | {} |",
                    escape_markdown(&index.name),
                    index.index_type.as_sql(),
                    if index.unique { "YES" } else { "NO" },
                    escape_markdown(&index_keys(table, index).join(", "))
                ));
            }
            lines.push(String::new());
        }
    }

    match script {
        Some(script) => {
            lines.push("## SQL".to_string());
            lines.push(String::new());
            lines.push("```sql".to_string());
            lines.push(script.trim_end().to_string());
            lines.push("```".to_string());
        }
        None => {
            lines.push("## Validation Errors".to_string());
            for (title, issues) in blocking_sections(validation) {
                if issues.is_empty() {
                    continue;
                }
                lines.push(String::new());
                lines.push(format!("### {title}"));
                lines.push(String::new());
                for issue in issues {
                    lines.push(format!(
                        "- `{}` {}",
                        issue.path,
                        escape_markdown(&issue.message)
                    ));
                }
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn escape_markdown(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}
