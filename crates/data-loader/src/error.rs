//! Error types for the data-loader crate.
//!
//! Only the loader can fail. Once a `Catalog` and `UserDirectory` exist,
//! every query downstream is infallible and degrades to empty output.

use thiserror::Error;

/// Errors that can occur while loading and validating the JSON collections
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The JSON document was malformed or a record was missing a field
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records share a key that must be unique (movie title, user id)
    #[error("Duplicate {entity} key: {key}")]
    DuplicateKey { entity: String, key: String },
}

impl DataLoadError {
    /// Wrap a serde_json error with the file it came from.
    pub(crate) fn from_json(file: &str, err: serde_json::Error) -> Self {
        DataLoadError::ParseError {
            file: file.to_string(),
            line: err.line(),
            reason: err.to_string(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
