//! Error types for tokenboard
//!
//! This module defines the error taxonomy used throughout the tokenboard
//! crates. All errors derive from `thiserror`, and every variant maps onto a
//! wire-level [`ErrorKind`] so callers can surface a stable machine-readable
//! kind next to the human-readable message.
//!
//! Errors are terminal for the current upload: nothing here is retried, and
//! the message is meant to be shown to the end user verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for tokenboard operations
#[derive(Error, Debug)]
pub enum TokenboardError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Uploaded file exceeds the byte-size cap
    #[error("File too large. Maximum size is {max_mib}MB")]
    FileTooLarge {
        /// The configured cap in MiB
        max_mib: u64,
    },

    /// Decoded row count exceeds the row cap
    #[error("Too many rows. Maximum is {max_rows} rows")]
    TooManyRows {
        /// The configured cap
        max_rows: usize,
    },

    /// Structurally unparseable input with zero recovered rows
    #[error("CSV parsing error: {0}")]
    Format(String),

    /// The file decoded but held no data rows
    #[error("CSV file contains no data rows")]
    EmptyInput,

    /// Every decoded row was filtered out during aggregation
    #[error("No valid data rows found (all entries may be errored)")]
    NoUsableRows,

    /// Generic format without a recognizable model column
    #[error("Could not find a model column. Expected: model, model_name, or llm_model")]
    MissingModelColumn,

    /// Client exceeded the upload rate limit
    #[error("Rate limit exceeded. Try again tomorrow.")]
    RateLimited,

    /// Byte-identical file was uploaded before
    #[error("This exact file has already been uploaded")]
    DuplicateUpload,

    /// Malformed upload request (bad filename, display name, ...)
    #[error("{0}")]
    InvalidRequest(String),
}

impl TokenboardError {
    /// The stable wire-level kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenboardError::FileTooLarge { .. } | TokenboardError::TooManyRows { .. } => {
                ErrorKind::Size
            }
            TokenboardError::Format(_) => ErrorKind::Format,
            TokenboardError::EmptyInput | TokenboardError::NoUsableRows => ErrorKind::NoData,
            TokenboardError::MissingModelColumn => ErrorKind::MissingColumns,
            TokenboardError::RateLimited => ErrorKind::RateLimited,
            TokenboardError::DuplicateUpload => ErrorKind::Duplicate,
            TokenboardError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            TokenboardError::Io(_) | TokenboardError::Json(_) => ErrorKind::Internal,
        }
    }
}

/// Machine-readable error kind surfaced alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Oversized input or row count
    Size,
    /// Structurally unparseable input
    Format,
    /// No usable rows at decode or aggregation time
    NoData,
    /// Required column could not be located
    MissingColumns,
    /// Upload rate limit hit
    RateLimited,
    /// Exact duplicate upload
    Duplicate,
    /// Malformed request
    InvalidRequest,
    /// Unexpected internal failure
    Internal,
}

impl ErrorKind {
    /// Stable string form of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Size => "size",
            ErrorKind::Format => "format",
            ErrorKind::NoData => "no_data",
            ErrorKind::MissingColumns => "missing_columns",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::InvalidRequest => "invalid_request",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Convenience type alias for Results in tokenboard
pub type Result<T> = std::result::Result<T, TokenboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = TokenboardError::EmptyInput;
        assert_eq!(error.to_string(), "CSV file contains no data rows");

        let error = TokenboardError::FileTooLarge { max_mib: 5 };
        assert_eq!(error.to_string(), "File too large. Maximum size is 5MB");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TokenboardError::TooManyRows { max_rows: 200_000 }.kind(),
            ErrorKind::Size
        );
        assert_eq!(TokenboardError::EmptyInput.kind(), ErrorKind::NoData);
        assert_eq!(TokenboardError::NoUsableRows.kind(), ErrorKind::NoData);
        assert_eq!(
            TokenboardError::MissingModelColumn.kind(),
            ErrorKind::MissingColumns
        );
        assert_eq!(
            TokenboardError::Format("bad quoting".into()).kind(),
            ErrorKind::Format
        );
    }

    #[test]
    fn test_kind_wire_form() {
        assert_eq!(ErrorKind::MissingColumns.as_str(), "missing_columns");
        let json = serde_json::to_string(&ErrorKind::NoData).unwrap();
        assert_eq!(json, "\"no_data\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: TokenboardError = io_error.into();
        assert!(matches!(error, TokenboardError::Io(_)));
        assert_eq!(error.kind(), ErrorKind::Internal);
    }
}
