//! Error types.
//!
//! Each stage gets its own error enum. The binary wraps them with
//! `anyhow` context at the edges.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the key-value store backing the analysis record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of a single enrichment call.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// The backend answered with a non-success status.
    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The request never completed (unreachable, timed out, reset).
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// A success response lacked the field the record consumes.
    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),
}

/// Validation failures of the intake form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please fill all fields: {0} is required")]
    MissingField(&'static str),

    #[error("CSV file not found: {0}")]
    FileNotFound(PathBuf),
}

/// Errors from a full intake submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] IntakeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_error_messages() {
        assert_eq!(
            IntakeError::MissingField("company name").to_string(),
            "Please fill all fields: company name is required"
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = EnrichmentError::MissingField("charts");
        assert_eq!(err.to_string(), "Response is missing field 'charts'");
    }
}
