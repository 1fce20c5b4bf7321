//! Crate-wide error type.

use thiserror::Error;

use crate::scheduler::SearchError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    /// The section search found no schedule.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The course catalog failed integrity checks.
    #[error("invalid catalog: {}", join_messages(.0))]
    InvalidCatalog(Vec<ValidationError>),

    /// A persisted schedule is missing fields or has the wrong shape.
    #[error("malformed schedule record: {0}")]
    MalformedRecord(String),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration value for '{field}': {message}")]
    InvalidConfig { field: String, message: String },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, Error>;
