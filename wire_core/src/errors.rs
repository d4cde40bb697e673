//! # Error Types
//!
//! Structured error types for wire_core. Every error carries enough context
//! for a caller to explain the failure without re-running the calculation.
//!
//! ## Example
//!
//! ```rust
//! use wire_core::errors::{SizingError, SizingResult};
//!
//! fn validate_length(length_ft: f64) -> SizingResult<()> {
//!     if !(length_ft > 0.0) {
//!         return Err(SizingError::invalid_field(
//!             "one_way_length_ft",
//!             length_ft.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_length(-5.0).unwrap_err();
//! assert_eq!(err.error_code(), "VALIDATION_ERROR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wire_core operations
pub type SizingResult<T> = Result<T, SizingError>;

/// One request field that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldViolation {
    /// Request field name (e.g., "load_current_amps")
    pub field: String,
    /// Offending value as entered
    pub value: String,
    /// Human-readable constraint that was violated
    pub reason: String,
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' = {} ({})", self.field, self.value, self.reason)
    }
}

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SizingError {
    /// One or more request fields violate their constraint.
    /// Raised before any table lookup.
    #[error("Invalid input: {}", format_violations(.violations))]
    Validation { violations: Vec<FieldViolation> },

    /// No tabulated conductor satisfies either the ampacity or the
    /// voltage-drop constraint.
    #[error(
        "No {material} conductor in the table carries {adjusted_ampacity_amps:.2} A \
         or has resistance at or below {max_resistance_ohms_per_kft:.4} ohms/kft - \
         reduce the run length or use parallel conductors"
    )]
    OutOfRange {
        material: String,
        adjusted_ampacity_amps: f64,
        max_resistance_ohms_per_kft: f64,
    },

    /// A material reached the conductor table without reference data.
    /// This is a programming error, not a user input error.
    #[error("No conductor table for material: {material}")]
    Configuration { material: String },

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
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SizingError {
    /// Create a Validation error for a single field
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        SizingError::Validation {
            violations: vec![FieldViolation {
                field: field.into(),
                value: value.into(),
                reason: reason.into(),
            }],
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(material: impl Into<String>, adjusted_ampacity_amps: f64, max_resistance_ohms_per_kft: f64) -> Self {
        SizingError::OutOfRange {
            material: material.into(),
            adjusted_ampacity_amps,
            max_resistance_ohms_per_kft,
        }
    }

    /// Create a Configuration error
    pub fn configuration(material: impl Into<String>) -> Self {
        SizingError::Configuration {
            material: material.into(),
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

    /// Names of the offending fields for a Validation error, empty otherwise
    pub fn fields(&self) -> Vec<&str> {
        match self {
            SizingError::Validation { violations } => {
                violations.iter().map(|v| v.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Check if the caller can recover by correcting the request
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SizingError::Validation { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SizingError::Validation { .. } => "VALIDATION_ERROR",
            SizingError::OutOfRange { .. } => "OUT_OF_RANGE",
            SizingError::Configuration { .. } => "CONFIGURATION_ERROR",
            SizingError::FileError { .. } => "FILE_ERROR",
            SizingError::SerializationError { .. } => "SERIALIZATION_ERROR",
            SizingError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = SizingError::out_of_range("copper", 500.0, 0.009);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"OutOfRange\""));
        let roundtrip: SizingError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(SizingError::invalid_field("x", "0", "bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(SizingError::configuration("silver").error_code(), "CONFIGURATION_ERROR");
        assert_eq!(SizingError::out_of_range("copper", 1.0, 1.0).error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_validation_fields_and_message() {
        let error = SizingError::Validation {
            violations: vec![
                FieldViolation {
                    field: "load_current_amps".to_string(),
                    value: "0".to_string(),
                    reason: "must be positive".to_string(),
                },
                FieldViolation {
                    field: "system_voltage".to_string(),
                    value: "-1".to_string(),
                    reason: "must be positive".to_string(),
                },
            ],
        };
        assert_eq!(error.fields(), vec!["load_current_amps", "system_voltage"]);
        let message = error.to_string();
        assert!(message.contains("load_current_amps"));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_recoverable() {
        assert!(SizingError::invalid_field("x", "0", "bad").is_recoverable());
        assert!(!SizingError::out_of_range("copper", 1.0, 1.0).is_recoverable());
        assert!(SizingError::configuration("silver").fields().is_empty());
    }
}
