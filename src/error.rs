//! Error types for featprep

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for featprep operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Errors raised while loading, transforming, or writing a table
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("cannot read input file {}: {source}", path.display())]
    MissingInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("{}:{line}: {detail}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        detail: String,
    },

    #[error("[{stage}] column not found: {column}")]
    MissingColumn { stage: &'static str, column: String },

    #[error("[{stage}] cannot encode column {column}: {detail}")]
    Encoding {
        stage: &'static str,
        column: String,
        detail: String,
    },

    #[error("column {column} has {actual} values, table has {expected} rows")]
    RowLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrepError {
    /// Pipeline stage that raised the error, if any
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            PrepError::MissingColumn { stage, .. } | PrepError::Encoding { stage, .. } => {
                Some(*stage)
            }
            PrepError::MissingInput { .. }
            | PrepError::UnsupportedFormat { .. }
            | PrepError::Parse { .. } => Some("load"),
            _ => None,
        }
    }
}
