use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Which of the two input tables a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTable {
    Reference,
    Observations,
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceTable::Reference => write!(f, "reference"),
            SourceTable::Observations => write!(f, "observation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("The {source_table} table is empty; the combined set cannot be built")]
    MissingSource { source_table: SourceTable },

    #[error("Species '{name}' not found in the current view")]
    SpeciesNotFound { name: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
