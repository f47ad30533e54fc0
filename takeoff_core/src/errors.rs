//! # Error Types
//!
//! Structured error types for takeoff_core. Every variant carries enough
//! context for a front end (or a script reading the JSON form) to point at
//! the offending field without parsing the message.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::errors::{TakeoffError, TakeoffResult};
//!
//! fn validate_area(area_m2: f64) -> TakeoffResult<()> {
//!     if area_m2 <= 0.0 {
//!         return Err(TakeoffError::invalid_config(
//!             "area_m2",
//!             area_m2.to_string(),
//!             "Area must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for takeoff_core operations
pub type TakeoffResult<T> = Result<T, TakeoffError>;

/// Structured error type for takeoff operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum TakeoffError {
    /// A building configuration value violates an engine precondition
    /// (non-positive area, zero levels, negative geometry override)
    #[error("Invalid config for '{field}': {value} - {reason}")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    /// Activity missing from the waste table. The activity set is closed,
    /// so this only happens with an incomplete coefficient file.
    #[error("No waste fraction defined for activity '{activity}'")]
    UnknownActivity { activity: String },

    /// A coefficient table entry violates its invariant
    #[error("Invalid coefficient in {table}.{key}: {value} - {reason}")]
    InvalidCoefficient {
        table: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Input outside the range the front end accepts
    #[error("'{field}' = {value} is outside the accepted range [{min}, {max}]")]
    OutOfBounds {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl TakeoffError {
    /// Create an InvalidConfig error
    pub fn invalid_config(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownActivity error
    pub fn unknown_activity(activity: impl Into<String>) -> Self {
        TakeoffError::UnknownActivity {
            activity: activity.into(),
        }
    }

    /// Create an InvalidCoefficient error
    pub fn invalid_coefficient(
        table: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TakeoffError::InvalidCoefficient {
            table: table.into(),
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutOfBounds error
    pub fn out_of_bounds(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        TakeoffError::OutOfBounds {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        TakeoffError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        TakeoffError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors caused by user input rather than by the program or
    /// its coefficient data.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TakeoffError::InvalidConfig { .. } | TakeoffError::OutOfBounds { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            TakeoffError::InvalidConfig { .. } => "INVALID_CONFIG",
            TakeoffError::UnknownActivity { .. } => "UNKNOWN_ACTIVITY",
            TakeoffError::InvalidCoefficient { .. } => "INVALID_COEFFICIENT",
            TakeoffError::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            TakeoffError::FileError { .. } => "FILE_ERROR",
            TakeoffError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
