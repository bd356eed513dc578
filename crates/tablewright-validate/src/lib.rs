//! Schema validation for Tablewright.
//!
//! `validate_for_export` produces categorized findings (structural,
//! datatype, naming); `advanced::analyze` adds optional heuristics; the
//! `document` module checks raw project JSON before it is deserialized.

pub mod advanced;
pub mod document;
pub mod errors;
pub mod naming;
pub mod validate;

pub use advanced::{AdvancedReport, analyze};
pub use document::{check_project_document, parse_project};
pub use errors::{DocumentError, IssueSeverity, SchemaValidationResult, ValidationIssue};
pub use naming::{
    NamingEngine, NamingFindings, Rename, apply_suggestions, check_project_names,
    suggest_column_name, suggest_index_name, suggest_table_name, validate_column_name,
    validate_index_name, validate_table_name,
};
pub use validate::validate_for_export;
