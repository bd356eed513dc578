//! T-SQL DDL emission.
//!
//! Statements are built as lists of lines and joined once, so every entry
//! point produces the same fixed layout for the same model.

use std::collections::HashSet;

use tablewright_core::{Column, DataType, Index, Project, Table, render_column_type};
use tablewright_validate::{SchemaValidationResult, validate_for_export};

use crate::errors::{GenerateError, Result};
use crate::model::ScriptOptions;

const INDENT: &str = "    ";

/// A project whose validation result allows script generation.
///
/// Only [`ValidatedProject::new`] builds one, so holding a value proves the
/// project had no structural or datatype errors when it was checked.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedProject<'a> {
    project: &'a Project,
}

impl<'a> ValidatedProject<'a> {
    /// Wrap `project` when `validation` has no blocking findings.
    pub fn new(project: &'a Project, validation: &SchemaValidationResult) -> Result<Self> {
        if !validation.can_export_schema() {
            return Err(GenerateError::NotExportable {
                errors: validation.blocking_errors().count(),
            });
        }
        Ok(Self { project })
    }

    /// Validate `project` and wrap it when it passes.
    pub fn check(project: &'a Project) -> Result<Self> {
        let validation = validate_for_export(project);
        Self::new(project, &validation)
    }

    pub fn project(&self) -> &'a Project {
        self.project
    }
}

/// Bracket-quote an identifier, doubling any closing bracket.
pub fn quote_identifier(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Render a Unicode string literal, doubling single quotes.
pub fn string_literal(value: &str) -> String {
    format!("N'{}'", value.replace('\'', "''"))
}

pub(crate) fn qualified_name(name: &str, schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("{}.{}", quote_identifier(schema), quote_identifier(name)),
        None => quote_identifier(name),
    }
}

/// Column definition used by `CREATE TABLE` and `ALTER TABLE ... ADD`.
pub fn column_definition(column: &Column) -> Result<String> {
    let mut definition = format!(
        "{} {}",
        quote_identifier(&column.name),
        render_column_type(column)?
    );
    if let Some(identity) = column.identity {
        definition.push_str(&format!(
            " IDENTITY({},{})",
            identity.seed, identity.increment
        ));
    }
    definition.push_str(if column.nullable() {
        " NULL"
    } else {
        " NOT NULL"
    });
    if let Some(default) = default_value(column) {
        definition.push_str(" DEFAULT ");
        definition.push_str(default);
    }
    Ok(definition)
}

pub(crate) fn default_value(column: &Column) -> Option<&str> {
    column
        .default_value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// `CREATE TABLE` for a single table, unqualified.
pub fn create_table(table: &Table) -> Result<String> {
    create_table_in(table, None)
}

pub(crate) fn create_table_in(table: &Table, schema: Option<&str>) -> Result<String> {
    let mut entries = Vec::new();
    for column in table.ordered_columns() {
        entries.push((column_definition(column)?, comment_text(column.description.as_deref())));
    }

    let keys = table.primary_key_columns();
    if !keys.is_empty() {
        let key_list: Vec<String> = keys
            .iter()
            .map(|column| format!("{} ASC", quote_identifier(&column.name)))
            .collect();
        entries.push((
            format!(
                "CONSTRAINT {} PRIMARY KEY CLUSTERED ({})",
                quote_identifier(&format!("PK_{}", table.name)),
                key_list.join(", ")
            ),
            None,
        ));
    }

    let mut lines = vec![format!(
        "CREATE TABLE {} (",
        qualified_name(&table.name, schema)
    )];
    let last = entries.len().saturating_sub(1);
    for (position, (definition, comment)) in entries.into_iter().enumerate() {
        let separator = if position < last { "," } else { "" };
        let mut line = format!("{INDENT}{definition}{separator}");
        if let Some(comment) = comment {
            line.push_str(" -- ");
            line.push_str(&comment);
        }
        lines.push(line);
    }
    lines.push(");".to_string());

    Ok(lines.join("\n"))
}

/// `CREATE INDEX` for `index` on `table`, unqualified.
///
/// Key columns that do not resolve inside `table` render as an inline
/// `/* ERROR: ... */` marker.
pub fn create_index(table: &Table, index: &Index) -> String {
    create_index_in(table, index, None)
}

pub(crate) fn create_index_in(table: &Table, index: &Index, schema: Option<&str>) -> String {
    let keys: Vec<String> = index
        .columns
        .iter()
        .map(|key| match table.column(key.column_id) {
            Some(column) => format!(
                "{} {}",
                quote_identifier(&column.name),
                key.sort_order.as_sql()
            ),
            None => format!("/* ERROR: column {} not found */", key.column_id),
        })
        .collect();

    format!(
        "CREATE {}{} INDEX {} ON {} ({});",
        if index.unique { "UNIQUE " } else { "" },
        index.index_type.as_sql(),
        quote_identifier(&index.name),
        qualified_name(&table.name, schema),
        keys.join(", ")
    )
}

/// CHECK and UNIQUE constraints derived from column types and unique indexes.
///
/// UNIQUE constraints are named `UQ_<table>_<columns>`; a second unique
/// index over the same columns appends its index name.
pub fn table_constraints(table: &Table, options: &ScriptOptions) -> Vec<String> {
    let target = qualified_name(&table.name, options.schema());
    let mut statements = Vec::new();

    for column in table.ordered_columns() {
        let check = match column.data_type {
            Some(DataType::Bit) => "IN (0, 1)",
            Some(DataType::TinyInt) => "BETWEEN 0 AND 255",
            Some(DataType::SmallInt) => "BETWEEN -32768 AND 32767",
            _ => continue,
        };
        statements.push(format!(
            "ALTER TABLE {target} ADD CONSTRAINT {} CHECK ({} {check});",
            quote_identifier(&format!("CK_{}_{}", table.name, column.name)),
            quote_identifier(&column.name)
        ));
    }

    let mut unique_names = HashSet::new();
    for index in table.indexes.iter().filter(|index| index.unique) {
        let columns: Vec<&Column> = index
            .columns
            .iter()
            .filter_map(|key| table.column(key.column_id))
            .collect();
        if columns.is_empty() {
            continue;
        }
        let names: Vec<&str> = columns.iter().map(|column| column.name.as_str()).collect();
        let quoted: Vec<String> = names.iter().map(|name| quote_identifier(name)).collect();
        let mut constraint = format!("UQ_{}_{}", table.name, names.join("_"));
        if !unique_names.insert(constraint.to_lowercase()) {
            constraint = format!("{constraint}_{}", index.name);
            unique_names.insert(constraint.to_lowercase());
        }
        statements.push(format!(
            "ALTER TABLE {target} ADD CONSTRAINT {} UNIQUE ({});",
            quote_identifier(&constraint),
            quoted.join(", ")
        ));
    }

    statements
}

/// Full deployment script for a validated project.
pub fn generate_script(validated: &ValidatedProject<'_>, options: &ScriptOptions) -> Result<String> {
    let project = validated.project();
    let schema = options.schema();
    let mut lines: Vec<String> = Vec::new();

    if options.include_comments {
        lines.push("-- =============================================".to_string());
        lines.push(format!("-- Project: {}", single_line(&project.name)));
        if let Some(description) = comment_text(project.description.as_deref()) {
            lines.push(format!("-- Description: {description}"));
        }
        lines.push(format!("-- Tables: {}", project.tables.len()));
        lines.push("-- Generated by Tablewright".to_string());
        lines.push("-- =============================================".to_string());
        lines.push(String::new());
    }

    if options.generate_batch_script {
        lines.push("SET NOCOUNT ON;".to_string());
        lines.push("SET XACT_ABORT ON;".to_string());
        lines.push("GO".to_string());
        lines.push(String::new());
        lines.push("BEGIN TRANSACTION;".to_string());
        end_batch(&mut lines, options);
        lines.push(String::new());
    }

    if options.include_existence_checks
        && let Some(schema) = schema
    {
        lines.push(format!(
            "IF NOT EXISTS (SELECT 1 FROM sys.schemas WHERE name = {})",
            string_literal(schema)
        ));
        lines.push("BEGIN".to_string());
        lines.push(format!(
            "{INDENT}EXEC({});",
            string_literal(&format!("CREATE SCHEMA {}", quote_identifier(schema)))
        ));
        lines.push("END".to_string());
        end_batch(&mut lines, options);
        lines.push(String::new());
    }

    for table in &project.tables {
        let target = qualified_name(&table.name, schema);
        if options.include_comments {
            lines.push(format!("-- Table: {}", single_line(&table.name)));
            if let Some(description) = comment_text(table.description.as_deref()) {
                lines.push(format!("-- {description}"));
            }
        }

        let create = create_table_in(table, schema)?;
        if options.include_drop_statements {
            lines.push(format!(
                "IF OBJECT_ID({}, N'U') IS NOT NULL",
                string_literal(&target)
            ));
            lines.push(format!("{INDENT}DROP TABLE {target};"));
            end_batch(&mut lines, options);
            lines.extend(create.lines().map(str::to_string));
        } else if options.include_existence_checks {
            lines.push(format!(
                "IF OBJECT_ID({}, N'U') IS NULL",
                string_literal(&target)
            ));
            lines.push("BEGIN".to_string());
            lines.extend(create.lines().map(|line| format!("{INDENT}{line}")));
            lines.push("END".to_string());
        } else {
            lines.extend(create.lines().map(str::to_string));
        }
        end_batch(&mut lines, options);
        lines.push(String::new());

        if options.include_constraints {
            let constraints = table_constraints(table, options);
            if !constraints.is_empty() {
                lines.extend(constraints);
                end_batch(&mut lines, options);
                lines.push(String::new());
            }
        }
    }

    if options.include_indexes {
        let statements: Vec<String> = project
            .tables
            .iter()
            .flat_map(|table| {
                table
                    .indexes
                    .iter()
                    .map(move |index| create_index_in(table, index, schema))
            })
            .collect();
        if !statements.is_empty() {
            if options.include_comments {
                lines.push("-- Indexes".to_string());
            }
            lines.extend(statements);
            end_batch(&mut lines, options);
            lines.push(String::new());
        }
    }

    if options.generate_batch_script {
        lines.push("COMMIT TRANSACTION;".to_string());
        lines.push("GO".to_string());
        lines.push(format!(
            "PRINT {};",
            string_literal(&format!("Schema {} created successfully.", project.name))
        ));
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    tracing::debug!(
        event = "script_generated",
        project = %project.name,
        tables = project.tables.len(),
        lines = lines.len(),
    );

    let mut script = lines.join("\n");
    script.push('\n');
    Ok(script)
}

fn end_batch(lines: &mut Vec<String>, options: &ScriptOptions) {
    if options.generate_batch_script {
        lines.push("GO".to_string());
    }
}

pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn comment_text(text: Option<&str>) -> Option<String> {
    text.map(single_line).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablewright_core::{IndexType, SortOrder};
    use uuid::Uuid;

    #[test]
    fn quotes_closing_brackets() {
        assert_eq!(quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(string_literal("it's"), "N'it''s'");
    }

    #[test]
    fn column_definition_includes_identity_and_default() {
        let column = Column::new("Id", DataType::BigInt)
            .primary_key()
            .with_identity(100, 5);
        assert_eq!(
            column_definition(&column).unwrap(),
            "[Id] BIGINT IDENTITY(100,5) NOT NULL"
        );

        let flag = Column::new("Active", DataType::Bit).not_null().with_default("((1))");
        assert_eq!(
            column_definition(&flag).unwrap(),
            "[Active] BIT NOT NULL DEFAULT ((1))"
        );
    }

    #[test]
    fn untyped_columns_cannot_be_rendered() {
        let table = Table::new("T").with_column(Column::untyped("Pending"));
        assert!(matches!(
            create_table(&table),
            Err(GenerateError::Core(tablewright_core::Error::UndefinedDataType))
        ));
    }

    #[test]
    fn unresolved_index_columns_render_marker() {
        let table = Table::new("T").with_column(Column::new("A", DataType::Int));
        let ghost = Uuid::new_v4();
        let index = Index::new("IX_T", IndexType::NonClustered).with_column(ghost, SortOrder::Asc);
        let sql = create_index(&table, &index);
        assert_eq!(
            sql,
            format!("CREATE NONCLUSTERED INDEX [IX_T] ON [T] (/* ERROR: column {ghost} not found */);")
        );
    }

    #[test]
    fn constraints_cover_small_integers_and_unique_indexes() {
        let mut table = Table::new("Flags")
            .with_column(Column::new("On", DataType::Bit))
            .with_column(Column::new("Level", DataType::TinyInt))
            .with_column(Column::new("Delta", DataType::SmallInt))
            .with_column(Column::new("Code", DataType::Char).with_length(3));
        let code = table.columns[3].id;
        table.add_index(
            Index::new("UX_Flags_Code", IndexType::NonClustered)
                .unique()
                .with_column(code, SortOrder::Asc),
        );

        let statements = table_constraints(&table, &ScriptOptions::default());
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE [Flags] ADD CONSTRAINT [CK_Flags_On] CHECK ([On] IN (0, 1));",
                "ALTER TABLE [Flags] ADD CONSTRAINT [CK_Flags_Level] CHECK ([Level] BETWEEN 0 AND 255);",
                "ALTER TABLE [Flags] ADD CONSTRAINT [CK_Flags_Delta] CHECK ([Delta] BETWEEN -32768 AND 32767);",
                "ALTER TABLE [Flags] ADD CONSTRAINT [UQ_Flags_Code] UNIQUE ([Code]);",
            ]
        );
    }

    #[test]
    fn unique_constraints_over_the_same_columns_get_distinct_names() {
        let mut table = Table::new("Users").with_column(Column::new("Email", DataType::NVarChar).with_length(320));
        let email = table.columns[0].id;
        table.add_index(
            Index::new("UX_Users_Email", IndexType::NonClustered)
                .unique()
                .with_column(email, SortOrder::Asc),
        );
        table.add_index(
            Index::new("UX_Users_EmailDesc", IndexType::NonClustered)
                .unique()
                .with_column(email, SortOrder::Desc),
        );

        assert_eq!(
            table_constraints(&table, &ScriptOptions::default()),
            vec![
                "ALTER TABLE [Users] ADD CONSTRAINT [UQ_Users_Email] UNIQUE ([Email]);",
                "ALTER TABLE [Users] ADD CONSTRAINT [UQ_Users_Email_UX_Users_EmailDesc] UNIQUE ([Email]);",
            ]
        );
    }

    #[test]
    fn blocked_projects_cannot_be_wrapped() {
        let project = Project::new("empty");
        assert!(matches!(
            ValidatedProject::check(&project),
            Err(GenerateError::NotExportable { errors: 1 })
        ));
    }
}
