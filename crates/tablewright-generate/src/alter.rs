//! Id-based schema diffs rendered as T-SQL migration statements.
//!
//! Columns, indexes and tables are matched by id, so a renamed object is a
//! change rather than a drop plus an add. Identity and primary key changes
//! are not diffed.

use std::collections::HashSet;

use tablewright_core::{Column, Project, Table, compatible, render_column_type};

use crate::ddl::{
    column_definition, create_index, create_table, default_value, quote_identifier, string_literal,
};
use crate::errors::Result;

/// Migration statements turning `original` into `modified`.
///
/// Statement order: table rename, index drops, column adds, column drops,
/// column alterations, index creates. A table with no differences yields a
/// single `-- No changes detected` comment.
pub fn alter_table(original: &Table, modified: &Table) -> Result<String> {
    let statements = table_changes(original, modified)?;
    if statements.is_empty() {
        return Ok(format!(
            "-- No changes detected for table {}",
            quote_identifier(&modified.name)
        ));
    }
    Ok(statements.join("\n"))
}

/// Migration statements for a whole project, matching tables by id.
///
/// Removed tables are dropped first, shared tables are altered in the order
/// of `modified`, and new tables are created last together with their
/// indexes.
pub fn alter_project(original: &Project, modified: &Project) -> Result<String> {
    let mut sections: Vec<String> = Vec::new();
    let kept: HashSet<_> = modified.tables.iter().map(|table| table.id).collect();

    for table in original.tables.iter().filter(|table| !kept.contains(&table.id)) {
        sections.push(format!("DROP TABLE {};", quote_identifier(&table.name)));
    }

    let mut created = Vec::new();
    for table in &modified.tables {
        match original.table(table.id) {
            Some(previous) => {
                let statements = table_changes(previous, table)?;
                if !statements.is_empty() {
                    sections.push(statements.join("\n"));
                }
            }
            None => created.push(table),
        }
    }

    for table in created {
        let mut lines = vec![create_table(table)?];
        lines.extend(table.indexes.iter().map(|index| create_index(table, index)));
        sections.push(lines.join("\n"));
    }

    tracing::debug!(
        event = "project_diffed",
        project = %modified.name,
        sections = sections.len(),
    );

    if sections.is_empty() {
        return Ok(format!(
            "-- No changes detected for project {}",
            quote_identifier(&modified.name)
        ));
    }
    Ok(sections.join("\n\n"))
}

fn table_changes(original: &Table, modified: &Table) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    let target = quote_identifier(&modified.name);

    if original.name != modified.name {
        statements.push(format!(
            "EXEC sp_rename {}, {};",
            string_literal(&quote_identifier(&original.name)),
            string_literal(&modified.name)
        ));
    }

    for index in &original.indexes {
        let changed = match modified.index(index.id) {
            Some(current) => !index.same_definition(current),
            None => true,
        };
        if changed {
            statements.push(format!(
                "DROP INDEX {} ON {target};",
                quote_identifier(&index.name)
            ));
        }
    }

    for column in modified.ordered_columns() {
        if original.column(column.id).is_none() {
            statements.push(format!(
                "ALTER TABLE {target} ADD {};",
                column_definition(column)?
            ));
        }
    }

    for column in original.ordered_columns() {
        if modified.column(column.id).is_none() {
            statements.push(format!(
                "ALTER TABLE {target} DROP COLUMN {};",
                quote_identifier(&column.name)
            ));
        }
    }

    for column in modified.ordered_columns() {
        if let Some(previous) = original.column(column.id)
            && column_changed(previous, column)
        {
            alter_column(&target, &modified.name, previous, column, &mut statements)?;
        }
    }

    for index in &modified.indexes {
        let changed = match original.index(index.id) {
            Some(previous) => !previous.same_definition(index),
            None => true,
        };
        if changed {
            statements.push(create_index(modified, index));
        }
    }

    Ok(statements)
}

fn column_changed(previous: &Column, current: &Column) -> bool {
    previous.name != current.name
        || shape_changed(previous, current)
        || default_value(previous) != default_value(current)
}

fn shape_changed(previous: &Column, current: &Column) -> bool {
    previous.data_type != current.data_type
        || previous.max_length != current.max_length
        || previous.precision != current.precision
        || previous.scale != current.scale
        || previous.nullable() != current.nullable()
}

fn alter_column(
    target: &str,
    table_name: &str,
    previous: &Column,
    current: &Column,
    statements: &mut Vec<String>,
) -> Result<()> {
    let column = quote_identifier(&current.name);

    if previous.name != current.name {
        statements.push(format!(
            "EXEC sp_rename {}, {}, N'COLUMN';",
            string_literal(&format!(
                "{}.{}",
                quote_identifier(table_name),
                quote_identifier(&previous.name)
            )),
            string_literal(&current.name)
        ));
    }

    if let (Some(from), Some(to)) = (previous.data_type, current.data_type)
        && !compatible(from, to)
    {
        statements.push(format!(
            "-- WARNING: changing {column} from {from} to {to} may lose data"
        ));
    }

    statements.push(format!(
        "ALTER TABLE {target} ALTER COLUMN {column} {} {};",
        render_column_type(current)?,
        if current.nullable() { "NULL" } else { "NOT NULL" }
    ));

    match (default_value(previous), default_value(current)) {
        (previous_default, Some(value)) if previous_default != Some(value) => {
            if previous_default.is_some() {
                statements.push(format!(
                    "-- NOTE: drop the existing default constraint on {column} first"
                ));
            }
            statements.push(format!(
                "ALTER TABLE {target} ADD DEFAULT {value} FOR {column};"
            ));
        }
        (Some(_), None) => {
            statements.push(format!(
                "-- NOTE: drop the default constraint on {column}; its name is server-generated"
            ));
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablewright_core::{DataType, Index, IndexType, SortOrder};

    fn base() -> Table {
        Table::new("Orders")
            .with_column(Column::new("Id", DataType::Int).primary_key())
            .with_column(Column::new("Total", DataType::Decimal).with_precision(10).with_scale(2))
    }

    #[test]
    fn identical_tables_report_no_changes() {
        let table = base();
        assert_eq!(
            alter_table(&table, &table.clone()).unwrap(),
            "-- No changes detected for table [Orders]"
        );
    }

    #[test]
    fn rename_uses_sp_rename() {
        let original = base();
        let mut modified = original.clone();
        modified.rename("Purchases");
        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "EXEC sp_rename N'[Orders]', N'Purchases';"
        );
    }

    #[test]
    fn incompatible_retype_warns_about_data_loss() {
        let original = base();
        let mut modified = original.clone();
        let total = modified.columns[1].id;
        let column = modified.column_mut(total).unwrap();
        column.data_type = Some(DataType::NVarChar);
        column.precision = None;
        column.scale = None;
        column.max_length = Some(20);

        let sql = alter_table(&original, &modified).unwrap();
        let lines: Vec<&str> = sql.lines().collect();
        assert_eq!(
            lines,
            vec![
                "-- WARNING: changing [Total] from DECIMAL to NVARCHAR may lose data",
                "ALTER TABLE [Orders] ALTER COLUMN [Total] NVARCHAR(20) NULL;",
            ]
        );
    }

    #[test]
    fn changed_index_is_dropped_and_recreated() {
        let mut original = base();
        let id = original.columns[0].id;
        original.add_index(Index::new("IX_Orders_Id", IndexType::NonClustered).with_column(id, SortOrder::Asc));
        let mut modified = original.clone();
        let index_id = modified.indexes[0].id;
        modified.index_mut(index_id).unwrap().columns[0].sort_order = SortOrder::Desc;

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "DROP INDEX [IX_Orders_Id] ON [Orders];\nCREATE NONCLUSTERED INDEX [IX_Orders_Id] ON [Orders] ([Id] DESC);"
        );
    }

    #[test]
    fn removed_column_is_dropped() {
        let original = base();
        let mut modified = original.clone();
        let total = modified.columns[1].id;
        modified.remove_column(total);

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "ALTER TABLE [Orders] DROP COLUMN [Total];"
        );
    }

    #[test]
    fn renamed_column_uses_sp_rename_with_column_kind() {
        let original = base();
        let mut modified = original.clone();
        let total = modified.columns[1].id;
        modified.column_mut(total).unwrap().rename("Amount");

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "EXEC sp_rename N'[Orders].[Total]', N'Amount', N'COLUMN';\n\
             ALTER TABLE [Orders] ALTER COLUMN [Amount] DECIMAL(10,2) NULL;"
        );
    }

    #[test]
    fn new_default_is_added_for_the_column() {
        let original = base();
        let mut modified = original.clone();
        let total = modified.columns[1].id;
        modified.column_mut(total).unwrap().default_value = Some("((0))".to_string());

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "ALTER TABLE [Orders] ALTER COLUMN [Total] DECIMAL(10,2) NULL;\n\
             ALTER TABLE [Orders] ADD DEFAULT ((0)) FOR [Total];"
        );
    }

    #[test]
    fn replaced_default_notes_the_existing_constraint() {
        let mut original = base();
        let total = original.columns[1].id;
        original.column_mut(total).unwrap().default_value = Some("((0))".to_string());
        let mut modified = original.clone();
        modified.column_mut(total).unwrap().default_value = Some("((1))".to_string());

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "ALTER TABLE [Orders] ALTER COLUMN [Total] DECIMAL(10,2) NULL;\n\
             -- NOTE: drop the existing default constraint on [Total] first\n\
             ALTER TABLE [Orders] ADD DEFAULT ((1)) FOR [Total];"
        );
    }

    #[test]
    fn removed_default_notes_the_server_generated_constraint() {
        let mut original = base();
        let total = original.columns[1].id;
        original.column_mut(total).unwrap().default_value = Some("((0))".to_string());
        let mut modified = original.clone();
        modified.column_mut(total).unwrap().default_value = None;

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "ALTER TABLE [Orders] ALTER COLUMN [Total] DECIMAL(10,2) NULL;\n\
             -- NOTE: drop the default constraint on [Total]; its name is server-generated"
        );
    }

    #[test]
    fn removed_index_is_only_dropped() {
        let mut original = base();
        let id = original.columns[0].id;
        original.add_index(Index::new("IX_Orders_Id", IndexType::NonClustered).with_column(id, SortOrder::Asc));
        let mut modified = original.clone();
        let index_id = modified.indexes[0].id;
        modified.remove_index(index_id);

        assert_eq!(
            alter_table(&original, &modified).unwrap(),
            "DROP INDEX [IX_Orders_Id] ON [Orders];"
        );
    }
}
