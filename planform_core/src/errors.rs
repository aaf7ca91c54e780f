//! # Error Types
//!
//! Structured error types for planform_core. The derivation engine and the
//! stability evaluator only ever raise [`SizingError::MissingField`] and
//! [`SizingError::InvalidValue`]; the remaining variants belong to the file
//! layer in [`crate::file_io`].
//!
//! Every error carries enough context (component and field) to point at the
//! offending entry of the aircraft document.
//!
//! ## Example
//!
//! ```rust
//! use planform_core::errors::{SizingError, SizingResult};
//!
//! fn require_aspect_ratio(value: Option<f64>) -> SizingResult<f64> {
//!     value.ok_or_else(|| SizingError::missing_field("wing", "aspect_ratio"))
//! }
//!
//! let err = require_aspect_ratio(None).unwrap_err();
//! assert_eq!(err.to_string(), "Missing required field: wing.aspect_ratio");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for planform_core operations
pub type SizingResult<T> = Result<T, SizingError>;

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SizingError {
    /// A required primary (or previously derived) field is absent
    #[error("Missing required field: {component}.{field}")]
    MissingField { component: String, field: String },

    /// A value is not finite, or a formula produced a non-finite result
    #[error("Invalid value for '{component}.{field}': {value} - {reason}")]
    InvalidValue {
        component: String,
        field: String,
        value: String,
        reason: String,
    },

    /// The aircraft document does not exist
    #[error("File not found: '{path}'")]
    FileNotFound { path: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// YAML/JSON parsing or rendering error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SizingError {
    /// Create a MissingField error
    pub fn missing_field(component: impl Into<String>, field: impl Into<String>) -> Self {
        SizingError::MissingField {
            component: component.into(),
            field: field.into(),
        }
    }

    /// Create an InvalidValue error
    pub fn invalid_value(
        component: impl Into<String>,
        field: impl Into<String>,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        SizingError::InvalidValue {
            component: component.into(),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        SizingError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        SizingError::SerializationError { reason: reason.into() }
    }

    /// Dotted path of the document entry this error refers to, if any.
    pub fn field_path(&self) -> Option<String> {
        match self {
            SizingError::MissingField { component, field }
            | SizingError::InvalidValue { component, field, .. } => Some(format!("{}.{}", component, field)),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SizingError::MissingField { .. } => "MISSING_FIELD",
            SizingError::InvalidValue { .. } => "INVALID_VALUE",
            SizingError::FileNotFound { .. } => "FILE_NOT_FOUND",
            SizingError::FileError { .. } => "FILE_ERROR",
            SizingError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SizingError::invalid_value("wing", "span_m", f64::NAN, "sqrt of a negative area x aspect ratio");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidValue\""));
        let roundtrip: SizingError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SizingError::missing_field("wing", "taper_ratio").error_code(), "MISSING_FIELD");
        assert_eq!(SizingError::serialization("bad yaml").error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_field_path() {
        let err = SizingError::missing_field("horizontal_stabilizer.elevator", "span_percentage");
        assert_eq!(err.field_path().as_deref(), Some("horizontal_stabilizer.elevator.span_percentage"));
        assert_eq!(SizingError::FileNotFound { path: "a.yaml".into() }.field_path(), None);
    }
}
