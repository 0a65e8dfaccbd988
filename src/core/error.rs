//! Error types for the qgrade library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using qgrade's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading reports or rating them.
///
/// A missing report or an empty test run is not an error: scorers recover
/// from those locally and flag the factor as having no data.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A test or coverage report could not be read or parsed.
    #[error("Failed to ingest {path}: {message}")]
    Ingest { path: PathBuf, message: String },

    /// A summary violates one of its invariants.
    #[error("Malformed {record}: {message}")]
    MalformedInput {
        record: &'static str,
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Quality gate violation (for CI/CD integration).
    #[error("Threshold violation: {message}")]
    ThresholdViolation { message: String, score: f64 },

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(String),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl Error {
    /// Create an ingestion error for the given report path.
    pub fn ingest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Ingest {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed-input error for the named record type.
    pub fn malformed(record: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            record,
            message: message.into(),
        }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a threshold violation error.
    pub fn threshold_violation(message: impl Into<String>, score: f64) -> Self {
        Self::ThresholdViolation {
            message: message.into(),
            score,
        }
    }
}
