use tablewright_core::Project;
use tablewright_validate::SchemaValidationResult;

use super::{blocking_sections, index_keys, key_marker, type_label};

/// Render project documentation as a standalone HTML page.
///
/// `script` is embedded in a `<pre>` block; pass `None` when the project is
/// not exportable and the blocking findings are listed instead.
pub fn render_html(
    project: &Project,
    validation: &SchemaValidationResult,
    script: Option<&str>,
    generated_at: &str,
) -> String {
    let mut lines = Vec::new();
    let title = escape_html(&project.name);
    lines.push("<!DOCTYPE html>".to_string());
    lines.push("<html>".to_string());
    lines.push("<head>".to_string());
    lines.push("<meta charset=\"utf-8\">".to_string());
    lines.push(format!("<title>{title}</title>"));
    lines.push("</head>".to_string());
    lines.push("<body>".to_string());
    lines.push(format!("<h1>{title}</h1>"));
    if let Some(description) = project.description.as_deref() {
        lines.push(format!("<p>{}</p>", escape_html(description)));
    }
    lines.push(format!(
        "<p class=\"generated\">Generated: {}</p>",
        escape_html(generated_at)
    ));

    lines.push("<section class=\"validation\">".to_string());
    lines.push("<ul>".to_string());
    lines.push(format!("<li>Errors: {}</li>", validation.total_errors()));
    lines.push(format!("<li>Warnings: {}</li>", validation.total_warnings()));
    lines.push(format!(
        "<li>Exportable: {}</li>",
        if validation.can_export_schema() { "yes" } else { "no" }
    ));
    lines.push("</ul>".to_string());
    lines.push("</section>".to_string());

    for table in &project.tables {
        lines.push("<section class=\"table\">".to_string());
        lines.push(format!("<h2>{}</h2>", escape_html(&table.name)));
        if let Some(description) = table.description.as_deref() {
            lines.push(format!("<p>{}</p>", escape_html(description)));
        }

        lines.push("<table>".to_string());
        lines.push(header_row(&["Column", "Type", "Nullable", "Key", "Default", "Description"]));
        for column in table.ordered_columns() {
            lines.push(data_row(&[
                column.name.as_str(),
                type_label(column).as_str(),
                if column.nullable() { "YES" } else { "NO" },
                key_marker(column),
                column.default_value.as_deref().unwrap_or(""),
                column.description.as_deref().unwrap_or(""),
            ]));
        }
        lines.push("</table>".to_string());

        if !table.indexes.is_empty() {
            lines.push("<h3>Indexes</h3>".to_string());
            lines.push("<table>".to_string());
            lines.push(header_row(&["Index", "Type", "Unique", "Columns"]));
            for index in &table.indexes {
                lines.push(data_row(&[
                    index.name.as_str(),
                    index.index_type.as_sql(),
                    if index.unique { "YES" } else { "NO" },
                    index_keys(table, index).join(", ").as_str(),
                ]));
            }
            lines.push("</table>".to_string());
        }
        lines.push("</section>".to_string());
    }

    match script {
        Some(script) => {
            lines.push("<section class=\"sql\">".to_string());
            lines.push("<h2>SQL</h2>".to_string());
            lines.push(format!("<pre><code>{}</code></pre>", escape_html(script.trim_end())));
            lines.push("</section>".to_string());
        }
        None => {
            lines.push("<section class=\"errors\">".to_string());
            lines.push("<h2>Validation Errors</h2>".to_string());
            for (title, issues) in blocking_sections(validation) {
                if issues.is_empty() {
                    continue;
                }
                lines.push(format!("<h3>{title}</h3>"));
                lines.push("<ul>".to_string());
                for issue in issues {
                    lines.push(format!(
                        "<li><code>{}</code> {}</li>",
                        escape_html(&issue.path),
                        escape_html(&issue.message)
                    ));
                }
                lines.push("</ul>".to_string());
            }
            lines.push("</section>".to_string());
        }
    }

    lines.push("</body>".to_string());
    lines.push("</html>".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Entity-escape `& < > " '`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn header_row(cells: &[&str]) -> String {
    let cells: Vec<String> = cells.iter().map(|cell| format!("<th>{cell}</th>")).collect();
    format!("<tr>{}</tr>", cells.concat())
}

fn data_row(cells: &[&str]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| format!("<td>{}</td>", escape_html(cell)))
        .collect();
    format!("<tr>{}</tr>", cells.concat())
}
