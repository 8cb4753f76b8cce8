use crate::model::Field;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DogShowError {
    #[error("{0}")]
    InvalidSelection(String),

    #[error("Enter some text to search for.")]
    EmptyQuery,

    /// `index` is the zero-based position; the message shows the row number.
    #[error("Row {} is out of range (table has {len} rows)", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },

    #[error("All fields must be filled in ({0} is empty).")]
    EmptyField(Field),

    #[error("Invalid row: {0}")]
    InvalidRow(String),

    #[error("Could not read {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report generation failed: {0}")]
    ReportGeneration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, DogShowError>;
