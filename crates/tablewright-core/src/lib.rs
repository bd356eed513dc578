//! Core contracts for Tablewright.
//!
//! This crate defines the schema model (projects, tables, columns, indexes),
//! naming rule configuration, and the SQL Server type catalog shared by the
//! validator, the generator and the CLI.

pub mod constraints;
pub mod error;
pub mod naming;
pub mod schema;
pub mod types;

pub use constraints::{Index, IndexColumn, IndexType, SortOrder};
pub use error::{Error, Result};
pub use naming::{CaseStyle, NamingRules, ObjectKind};
pub use schema::{Column, Identity, Position, Project, Table};
pub use types::{
    DataType, LengthBound, LiteralKind, MAX_LENGTH, TypeCategory, TypeFinding, TypeReport,
    TypeSpec, compatible, render, render_column_type, validate_column,
};

/// JSON Schema describing a project document.
pub fn project_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(Project)
}
