use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the card dataset
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Dataset file could not be read
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dataset is not valid JSON
    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top level of the dataset must map card names to records
    #[error("dataset top level must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
