use thiserror::Error;

/// Errors emitted by the generator and exporters.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The validation result has blocking findings.
    #[error("schema cannot be exported: {errors} blocking error(s)")]
    NotExportable { errors: usize },
    #[error("core error: {0}")]
    Core(#[from] tablewright_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("utf-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenerateError>;
