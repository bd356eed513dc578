use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constraints::Index;
use crate::error::{Error, Result};
use crate::naming::NamingRules;
use crate::types::DataType;

/// Top-level schema document: a named set of tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub naming_rules: Option<NamingRules>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            naming_rules: None,
            tables: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_naming_rules(mut self, rules: NamingRules) -> Self {
        self.naming_rules = Some(rules);
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.add_table(table);
        self
    }

    /// Attach a table and return its id.
    pub fn add_table(&mut self, mut table: Table) -> Uuid {
        table.project_id = Some(self.id);
        let id = table.id;
        self.tables.push(table);
        id
    }

    pub fn remove_table(&mut self, table_id: Uuid) -> Option<Table> {
        let position = self.tables.iter().position(|table| table.id == table_id)?;
        Some(self.tables.remove(position))
    }

    pub fn table(&self, table_id: Uuid) -> Option<&Table> {
        self.tables.iter().find(|table| table.id == table_id)
    }

    pub fn table_mut(&mut self, table_id: Uuid) -> Option<&mut Table> {
        self.tables.iter_mut().find(|table| table.id == table_id)
    }

    /// Case-insensitive lookup.
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Canvas coordinates of a table in the editor. Not used for generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Table definition with ordered columns and indexes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub id: Uuid,
    #[serde(default)]
    pub project_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            project_id: None,
            name: name.into(),
            description: None,
            position: Position::default(),
            columns: Vec::new(),
            indexes: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.add_index(index);
        self
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = Position { x, y };
    }

    /// Attach a column and return its id.
    pub fn add_column(&mut self, mut column: Column) -> Uuid {
        column.table_id = Some(self.id);
        let id = column.id;
        self.columns.push(column);
        id
    }

    /// Detach a column. Index key columns referencing it are left in place
    /// and surface as structural errors on the next validation.
    pub fn remove_column(&mut self, column_id: Uuid) -> Option<Column> {
        let position = self
            .columns
            .iter()
            .position(|column| column.id == column_id)?;
        Some(self.columns.remove(position))
    }

    pub fn column(&self, column_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn column_mut(&mut self, column_id: Uuid) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|column| column.id == column_id)
    }

    /// Case-insensitive lookup.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    /// Columns in render order: by `order_index`, ties kept in insertion order.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by_key(|column| column.order_index);
        columns
    }

    /// Primary key columns in render order.
    pub fn primary_key_columns(&self) -> Vec<&Column> {
        self.ordered_columns()
            .into_iter()
            .filter(|column| column.is_primary_key())
            .collect()
    }

    pub fn move_column(&mut self, column_id: Uuid, order_index: i32) -> Result<()> {
        let column = self
            .column_mut(column_id)
            .ok_or_else(|| Error::NotFound(format!("column {column_id}")))?;
        column.order_index = order_index;
        Ok(())
    }

    /// Renumber columns `0..n` following `column_ids`. Columns not listed
    /// keep their relative order after the listed ones.
    pub fn reorder_columns(&mut self, column_ids: &[Uuid]) -> Result<()> {
        if let Some(missing) = column_ids.iter().find(|id| self.column(**id).is_none()) {
            return Err(Error::NotFound(format!("column {missing}")));
        }

        let ranks: HashMap<Uuid, usize> = column_ids
            .iter()
            .enumerate()
            .map(|(rank, id)| (*id, rank))
            .collect();
        let mut ordered: Vec<Uuid> = self.ordered_columns().iter().map(|c| c.id).collect();
        ordered.sort_by_key(|id| ranks.get(id).copied().unwrap_or(usize::MAX));

        for (position, id) in ordered.into_iter().enumerate() {
            if let Some(column) = self.column_mut(id) {
                column.order_index = position as i32;
            }
        }
        Ok(())
    }

    /// Attach an index and return its id.
    pub fn add_index(&mut self, mut index: Index) -> Uuid {
        index.table_id = Some(self.id);
        let id = index.id;
        self.indexes.push(index);
        id
    }

    pub fn remove_index(&mut self, index_id: Uuid) -> Option<Index> {
        let position = self.indexes.iter().position(|index| index.id == index_id)?;
        Some(self.indexes.remove(position))
    }

    pub fn index(&self, index_id: Uuid) -> Option<&Index> {
        self.indexes.iter().find(|index| index.id == index_id)
    }

    pub fn index_mut(&mut self, index_id: Uuid) -> Option<&mut Index> {
        self.indexes.iter_mut().find(|index| index.id == index_id)
    }

    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(Column::is_primary_key)
    }

    pub fn has_clustered_index(&self) -> bool {
        self.indexes.iter().any(Index::is_clustered)
    }
}

/// `IDENTITY(seed, increment)` settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Identity {
    #[serde(default = "default_identity_step")]
    pub seed: i64,
    #[serde(default = "default_identity_step")]
    pub increment: i64,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            seed: 1,
            increment: 1,
        }
    }
}

fn default_identity_step() -> i64 {
    1
}

fn default_nullable() -> bool {
    true
}

/// Column definition.
///
/// `nullable` and `is_primary_key` are only changed through methods so that
/// a primary key column can never be made nullable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub id: Uuid,
    #[serde(default)]
    pub table_id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` means the type has not been chosen yet.
    #[serde(default)]
    pub data_type: Option<DataType>,
    #[serde(default)]
    pub max_length: Option<i32>,
    #[serde(default)]
    pub precision: Option<i32>,
    #[serde(default)]
    pub scale: Option<i32>,
    #[serde(default = "default_nullable")]
    nullable: bool,
    #[serde(default)]
    is_primary_key: bool,
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

impl Column {
    /// Nullable, non-key column of the given type.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            data_type: Some(data_type),
            ..Self::untyped(name)
        }
    }

    /// Column whose type has not been chosen yet.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id: None,
            name: name.into(),
            description: None,
            data_type: None,
            max_length: None,
            precision: None,
            scale: None,
            nullable: true,
            is_primary_key: false,
            identity: None,
            default_value: None,
            order_index: 0,
        }
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn with_scale(mut self, scale: i32) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_order_index(mut self, order_index: i32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn with_identity(mut self, seed: i64, increment: i64) -> Self {
        self.identity = Some(Identity { seed, increment });
        self
    }

    /// Mark as primary key; this also makes the column non-nullable.
    pub fn primary_key(mut self) -> Self {
        self.set_primary_key(true);
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn is_identity(&self) -> bool {
        self.identity.is_some()
    }

    pub fn set_nullable(&mut self, nullable: bool) -> Result<()> {
        if nullable && self.is_primary_key {
            return Err(Error::PrimaryKeyNullable(self.name.clone()));
        }
        self.nullable = nullable;
        Ok(())
    }

    /// Setting the flag forces the column to non-null; clearing it leaves
    /// nullability unchanged.
    pub fn set_primary_key(&mut self, is_primary_key: bool) {
        self.is_primary_key = is_primary_key;
        if is_primary_key {
            self.nullable = false;
        }
    }

    pub fn set_identity(&mut self, identity: Option<Identity>) {
        self.identity = identity;
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Change the type and its parameters in a single step.
    pub fn retype(
        &mut self,
        data_type: DataType,
        max_length: Option<i32>,
        precision: Option<i32>,
        scale: Option<i32>,
    ) {
        self.data_type = Some(data_type);
        self.max_length = max_length;
        self.precision = precision;
        self.scale = scale;
    }
}
