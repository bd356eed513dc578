//! T-SQL script generation and schema documentation for Tablewright.
//!
//! Scripts are only produced from a [`ValidatedProject`]; the document
//! exporters substitute an error report when validation blocks export.

pub mod alter;
pub mod ddl;
pub mod engine;
pub mod errors;
pub mod model;
pub mod output;

pub use alter::{alter_project, alter_table};
pub use ddl::{
    ValidatedProject, column_definition, create_index, create_table, generate_script,
    quote_identifier, string_literal, table_constraints,
};
pub use engine::Exporter;
pub use errors::{GenerateError, Result};
pub use model::{ExportFormat, ExportResult, ScriptOptions};
pub use output::{TableStatus, table_status};
