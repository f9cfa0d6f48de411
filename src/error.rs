//! Error types for deck_reconcile

use std::path::PathBuf;

/// Unified error type for reconciliation runs
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// File or directory operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Collection export lacks one of the required columns
    #[error("Collection is missing required column: {0}")]
    MissingColumn(String),

    /// Collection field could not be interpreted
    #[error("Invalid value '{value}' for column '{column}' on line {line}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// A list line does not match the card line grammar
    #[error("Unparsed line {line_number} in {}: '{line}'", .path.display())]
    UnparsedLine {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    /// Stripping the legacy prefix would overwrite an existing file
    #[error("Cannot rename {} to {}: target already exists", .from.display(), .to.display())]
    NameCollision { from: PathBuf, to: PathBuf },
}

impl ReconcileError {
    /// Wraps an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReconcileError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for deck_reconcile operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
