use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Physical kind of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexType {
    Clustered,
    #[default]
    NonClustered,
}

impl IndexType {
    pub fn as_sql(self) -> &'static str {
        match self {
            IndexType::Clustered => "CLUSTERED",
            IndexType::NonClustered => "NONCLUSTERED",
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for IndexType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CLUSTERED" => Ok(IndexType::Clustered),
            "NONCLUSTERED" => Ok(IndexType::NonClustered),
            _ => Err(Error::UnknownVariant {
                kind: "index type",
                value: value.to_string(),
            }),
        }
    }
}

/// Sort direction of an index key column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(Error::UnknownVariant {
                kind: "sort order",
                value: value.to_string(),
            }),
        }
    }
}

/// Key column of an index, referencing a column of the same table by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IndexColumn {
    pub column_id: Uuid,
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Index definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Index {
    pub id: Uuid,
    #[serde(default)]
    pub table_id: Option<Uuid>,
    pub name: String,
    #[serde(rename = "type", default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub columns: Vec<IndexColumn>,
}

impl Index {
    pub fn new(name: impl Into<String>, index_type: IndexType) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id: None,
            name: name.into(),
            index_type,
            unique: false,
            columns: Vec::new(),
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn with_column(mut self, column_id: Uuid, sort_order: SortOrder) -> Self {
        self.add_column(column_id, sort_order);
        self
    }

    pub fn add_column(&mut self, column_id: Uuid, sort_order: SortOrder) {
        self.columns.push(IndexColumn {
            column_id,
            sort_order,
        });
    }

    /// Remove a key column; returns whether it was present.
    pub fn remove_column(&mut self, column_id: Uuid) -> bool {
        let before = self.columns.len();
        self.columns.retain(|column| column.column_id != column_id);
        before != self.columns.len()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_clustered(&self) -> bool {
        self.index_type == IndexType::Clustered
    }

    /// Compares everything that ends up in `CREATE INDEX`.
    pub fn same_definition(&self, other: &Index) -> bool {
        self.name == other.name
            && self.index_type == other.index_type
            && self.unique == other.unique
            && self.columns == other.columns
    }
}
