//! Error types for trust root assembly

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while assembling a trust root descriptor
#[derive(Debug, Error)]
pub enum Error {
    /// File system error, tagged with the path involved
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization error
    #[error("failed to process YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Base64 decoding error
    #[error("failed to decode base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Certificate parsing error
    #[error("failed to parse certificate: {0}")]
    Certificate(String),

    /// A record in the trusted root did not have the expected shape
    #[error("malformed {what}: {source}")]
    Malformed {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field was present but held the wrong kind of value
    #[error("field {field} is not a {expected}")]
    UnexpectedType {
        field: String,
        expected: &'static str,
    },

    /// A section of the descriptor template is missing or not a mapping
    #[error("missing '{0}' section in YAML")]
    MissingSection(&'static str),

    /// A required option was not provided
    #[error("the --{0} flag is required")]
    MissingArgument(&'static str),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for trust root assembly
pub type Result<T> = std::result::Result<T, Error>;
