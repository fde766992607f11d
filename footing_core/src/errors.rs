//! # Error Types
//!
//! Structured error types for footing_core. Each variant carries enough
//! context for a caller to tell a user-correctable input problem from an
//! upstream fault.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::errors::{CalcError, CalcResult};
//!
//! fn validate_cover(cover_in: f64) -> CalcResult<()> {
//!     if cover_in < 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "cover_in",
//!             cover_in.to_string(),
//!             "Cover cannot be negative",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for footing_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for footing design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Bar size code is not one of the standard designations
    #[error("Invalid bar designation: #{designation} is not a standard bar size")]
    InvalidBarDesignation { designation: u32 },

    /// Computed bar spacing is zero or negative
    #[error("Degenerate spacing in {direction}-direction: {reason}")]
    DegenerateSpacing { direction: String, reason: String },

    /// The external spreadsheet evaluation failed or timed out
    #[error("Evaluation failed: {reason}")]
    EvaluationFailure { reason: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidBarDesignation error
    pub fn invalid_bar_designation(designation: u32) -> Self {
        CalcError::InvalidBarDesignation { designation }
    }

    /// Create a DegenerateSpacing error
    pub fn degenerate_spacing(direction: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DegenerateSpacing {
            direction: direction.into(),
            reason: reason.into(),
        }
    }

    /// Create an EvaluationFailure error
    pub fn evaluation_failure(reason: impl Into<String>) -> Self {
        CalcError::EvaluationFailure {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether the user can fix this by changing their inputs.
    ///
    /// A bad DCR coming back from the workbook is reported as `Internal`
    /// by the report builder, so it never lands here as `InvalidInput`.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidInput { .. }
                | CalcError::InvalidBarDesignation { .. }
                | CalcError::DegenerateSpacing { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::InvalidBarDesignation { .. } => "INVALID_BAR_DESIGNATION",
            CalcError::DegenerateSpacing { .. } => "DEGENERATE_SPACING",
            CalcError::EvaluationFailure { .. } => "EVALUATION_FAILURE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_bar_designation(12);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("InvalidBarDesignation"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_bar_designation(2).error_code(), "INVALID_BAR_DESIGNATION");
        assert_eq!(CalcError::degenerate_spacing("X", "no bars").error_code(), "DEGENERATE_SPACING");
        assert_eq!(CalcError::evaluation_failure("timeout").error_code(), "EVALUATION_FAILURE");
    }

    #[test]
    fn test_user_correctable() {
        assert!(CalcError::invalid_bar_designation(2).is_user_correctable());
        assert!(CalcError::degenerate_spacing("Y", "overlap").is_user_correctable());
        assert!(!CalcError::evaluation_failure("boom").is_user_correctable());
        assert!(!CalcError::Internal { message: "x".into() }.is_user_correctable());
    }

    #[test]
    fn test_display_message() {
        let error = CalcError::invalid_bar_designation(12);
        assert_eq!(error.to_string(), "Invalid bar designation: #12 is not a standard bar size");
    }
}
