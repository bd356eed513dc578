use chrono::{DateTime, SecondsFormat, Utc};
use tablewright_core::Project;
use tablewright_validate::SchemaValidationResult;

use crate::ddl::{ValidatedProject, generate_script, quote_identifier};
use crate::errors::Result;
use crate::model::{ExportFormat, ExportResult, ScriptOptions};
use crate::output::{csv, html, json, markdown};

/// Renders a project and a previously computed validation result into any
/// [`ExportFormat`].
#[derive(Debug, Clone)]
pub struct Exporter {
    options: ScriptOptions,
    generated_at: DateTime<Utc>,
}

impl Exporter {
    pub fn new(options: ScriptOptions) -> Self {
        Self {
            options,
            generated_at: Utc::now(),
        }
    }

    /// Pin the timestamp written into documents.
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn options(&self) -> &ScriptOptions {
        &self.options
    }

    pub fn export(
        &self,
        project: &Project,
        validation: &SchemaValidationResult,
        format: ExportFormat,
    ) -> Result<ExportResult> {
        let generated_at = self
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        let content = match format {
            ExportFormat::Sql => match self.script(project, validation)? {
                Some(script) => script,
                None => sql_error_report(project, validation),
            },
            ExportFormat::Markdown => {
                let script = self.script(project, validation)?;
                markdown::render_markdown(project, validation, script.as_deref(), &generated_at)
            }
            ExportFormat::Html => {
                let script = self.script(project, validation)?;
                html::render_html(project, validation, script.as_deref(), &generated_at)
            }
            ExportFormat::Json => json::render_json(project, validation, &generated_at)?,
            ExportFormat::Csv => csv::render_csv(project, validation)?,
        };

        tracing::info!(
            event = "project_exported",
            project = %project.name,
            format = %format,
            can_export = validation.can_export_schema(),
            bytes = content.len(),
        );

        Ok(ExportResult { content, format })
    }

    fn script(
        &self,
        project: &Project,
        validation: &SchemaValidationResult,
    ) -> Result<Option<String>> {
        if !validation.can_export_schema() {
            return Ok(None);
        }
        let validated = ValidatedProject::new(project, validation)?;
        generate_script(&validated, &self.options).map(Some)
    }
}

fn sql_error_report(project: &Project, validation: &SchemaValidationResult) -> String {
    let mut lines = vec![format!(
        "-- Project {} cannot be exported: {} blocking error(s)",
        quote_identifier(&project.name),
        validation.blocking_errors().count()
    )];
    for (title, issues) in crate::output::blocking_sections(validation) {
        if issues.is_empty() {
            continue;
        }
        lines.push(format!("-- {title}:"));
        for issue in issues {
            lines.push(format!(
                "--   {} {}",
                issue.path,
                crate::ddl::single_line(&issue.message)
            ));
        }
    }
    let mut report = lines.join("\n");
    report.push('\n');
    report
}
