use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Toggles for [`generate_script`](crate::generate_script).
///
/// Every flag is independent; no combination is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Emit `DROP TABLE` before each `CREATE TABLE`.
    pub include_drop_statements: bool,
    /// Emit header and per-table comments.
    pub include_comments: bool,
    /// Emit `CREATE INDEX` statements.
    pub include_indexes: bool,
    /// Emit CHECK and UNIQUE constraints.
    pub include_constraints: bool,
    /// Guard object creation with `IF OBJECT_ID(...)` / `sys.schemas` checks.
    pub include_existence_checks: bool,
    /// Wrap the script in a transaction and separate batches with `GO`.
    pub generate_batch_script: bool,
    /// Schema that qualifies every table name.
    pub schema_name: Option<String>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            include_drop_statements: false,
            include_comments: true,
            include_indexes: true,
            include_constraints: true,
            include_existence_checks: false,
            generate_batch_script: false,
            schema_name: None,
        }
    }
}

impl ScriptOptions {
    /// Schema name, ignoring blank values.
    pub fn schema(&self) -> Option<&str> {
        self.schema_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Document formats produced by the [`Exporter`](crate::Exporter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Sql,
    Markdown,
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Sql,
        ExportFormat::Markdown,
        ExportFormat::Html,
        ExportFormat::Json,
        ExportFormat::Csv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Sql => "sql",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Sql => "sql",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = tablewright_core::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(ExportFormat::Sql),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(tablewright_core::Error::UnknownVariant {
                kind: "export format",
                value: other.to_string(),
            }),
        }
    }
}

/// Rendered document and the format it was rendered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    pub content: String,
    pub format: ExportFormat,
}
