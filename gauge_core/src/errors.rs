//! # Error Types
//!
//! Structured error types for gauge_core. Validation failures carry one entry
//! per offending field so a form (or the CLI) can show every message at once,
//! and every variant serializes cleanly for JSON consumers.
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::errors::{CalcError, CalcResult, FieldError};
//!
//! fn check_height(height_cm: f64) -> CalcResult<()> {
//!     if height_cm <= 0.0 {
//!         return Err(CalcError::validation(vec![FieldError::range(
//!             "height_cm",
//!             "Height must be positive",
//!         )]));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_height(-1.0).is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for gauge_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// A required field is absent
    Required,
    /// A numeric value lies outside the declared bounds
    Range,
    /// A tag is not part of the field's option list
    InvalidOption,
    /// The value has the wrong shape (text where a number is expected, etc.)
    InvalidType,
    /// A rule spanning several fields does not hold
    Constraint,
}

impl FieldErrorKind {
    /// Short code used in messages and JSON
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::Required => "required",
            FieldErrorKind::Range => "range",
            FieldErrorKind::InvalidOption => "invalid option",
            FieldErrorKind::InvalidType => "invalid type",
            FieldErrorKind::Constraint => "constraint",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A validation failure attached to one named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        FieldError::new(field, FieldErrorKind::Required, "This field is required")
    }

    pub fn range(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, FieldErrorKind::Range, message)
    }

    pub fn invalid_option(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, FieldErrorKind::InvalidOption, message)
    }

    pub fn invalid_type(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, FieldErrorKind::InvalidType, message)
    }

    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError::new(field, FieldErrorKind::Constraint, message)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.kind, self.message)
    }
}

/// Structured error type for calculator operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by API and CLI consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more fields failed validation; no result is produced
    #[error("Validation failed for {}", summarize(.errors))]
    Validation { errors: Vec<FieldError> },

    /// No calculator is registered under this id
    #[error("Unknown calculator: {id}")]
    UnknownCalculator { id: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Settings file could not be parsed
    #[error("Config error: {reason}")]
    ConfigError { reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn summarize(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return "0 fields".to_string();
    }
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    format!("{} field(s): {}", errors.len(), fields.join(", "))
}

impl CalcError {
    /// Create a Validation error from a list of field errors
    pub fn validation(errors: Vec<FieldError>) -> Self {
        CalcError::Validation { errors }
    }

    /// Create an UnknownCalculator error
    pub fn unknown_calculator(id: impl Into<String>) -> Self {
        CalcError::UnknownCalculator { id: id.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::ConfigError { reason: reason.into() }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// Field errors carried by this error, if it is a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CalcError::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// Check if the user can fix this error by changing their input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CalcError::Validation { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_FAILED",
            CalcError::UnknownCalculator { .. } => "UNKNOWN_CALCULATOR",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::ConfigError { .. } => "CONFIG_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::validation(vec![
            FieldError::required("age"),
            FieldError::range("bmi", "BMI must be between 10 and 80"),
        ]);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        assert!(json.contains("\"kind\":\"required\""));

        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let error = CalcError::validation(vec![
            FieldError::required("age"),
            FieldError::invalid_option("sex", "Unknown option 'x'"),
        ]);
        assert_eq!(error.to_string(), "Validation failed for 2 field(s): age, sex");
        assert_eq!(error.field_errors().len(), 2);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::validation(vec![]).error_code(), "VALIDATION_FAILED");
        assert_eq!(CalcError::unknown_calculator("nope").error_code(), "UNKNOWN_CALCULATOR");
        assert_eq!(CalcError::config("bad toml").error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::validation(vec![FieldError::required("x")]).is_recoverable());
        assert!(!CalcError::unknown_calculator("x").is_recoverable());
        assert!(CalcError::unknown_calculator("x").field_errors().is_empty());
    }
}
