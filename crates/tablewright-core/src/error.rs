use thiserror::Error;

/// Core error type shared across Tablewright crates.
///
/// These are misuse errors. Data problems in a schema are reported as
/// validation findings instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A type string was requested for a column without a data type.
    #[error("data type is undefined")]
    UndefinedDataType,
    /// A value outside one of the closed enums (data type, index type, ...).
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
    /// Attempt to make a primary key column nullable.
    #[error("primary key column '{0}' cannot be nullable")]
    PrimaryKeyNullable(String),
    /// A referenced entity does not exist in its parent.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Convenience alias for results returned by Tablewright crates.
pub type Result<T> = std::result::Result<T, Error>;
