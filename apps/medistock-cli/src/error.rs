//! # Error Types
//!
//! Errors for the CLI layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MediStock                              │
//! │                                                                         │
//! │  Config file / snapshot / export I/O ──► AppError ──┐                  │
//! │                                                      │                  │
//! │  medistock-core ── CoreError / ValidationError ──────┼──► ApiError     │
//! │                                                      │    (JSON, stderr)│
//! │  Bad CLI values (amounts, filters) ──────────────────┘                  │
//! │                                                                         │
//! │  {                                                                      │
//! │    "code": "COST_PRICE_TOO_LARGE",                                      │
//! │    "message": "Cost price per piece 12345678901.00 has 11 digits ..."   │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use medistock_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;

// =============================================================================
// App Error
// =============================================================================

/// Result type alias for app-layer operations.
pub type AppResult<T> = Result<T, AppError>;

/// Failures in the app's own I/O: configuration, snapshot, export.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// No snapshot path was given on the command line or in the config.
    #[error("No snapshot configured. Pass --snapshot or set [snapshot] path")]
    NoSnapshot,

    /// The snapshot file could not be read.
    #[error("Failed to read snapshot {path}: {reason}")]
    SnapshotReadFailed { path: PathBuf, reason: String },

    /// The snapshot file is not an inventory list.
    #[error("Invalid snapshot {path}: {reason}")]
    SnapshotInvalid { path: PathBuf, reason: String },

    /// Writing the export failed.
    #[error("Export failed: {0}")]
    ExportFailed(String),
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        AppError::ConfigSaveFailed(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::ExportFailed(err.to_string())
    }
}

// =============================================================================
// API Error
// =============================================================================

/// What a caller sees when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "search must be at most 100 characters"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Derived cost per piece exceeds the digit policy
    CostPriceTooLarge,

    /// Snapshot missing, unreadable or malformed
    SnapshotError,

    /// Configuration could not be loaded, saved or validated
    ConfigError,

    /// CSV export could not be written
    ExportError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts app errors to API errors.
impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let code = match &err {
            AppError::InvalidConfig(_)
            | AppError::ConfigLoadFailed(_)
            | AppError::ConfigSaveFailed(_) => ErrorCode::ConfigError,
            AppError::NoSnapshot
            | AppError::SnapshotReadFailed { .. }
            | AppError::SnapshotInvalid { .. } => ErrorCode::SnapshotError,
            AppError::ExportFailed(_) => ErrorCode::ExportError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CostPriceTooLarge { .. } => {
                ApiError::new(ErrorCode::CostPriceTooLarge, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization failed: {}", err);
        ApiError::internal("Failed to serialize output")
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use medistock_core::Money;

    #[test]
    fn test_cost_guard_keeps_its_code() {
        let err: ApiError = CoreError::CostPriceTooLarge {
            value: Money::from_cents(12_345_678_901_00),
            digits: 11,
            max: 10,
        }
        .into();
        assert_eq!(err.code, ErrorCode::CostPriceTooLarge);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "COST_PRICE_TOO_LARGE");
    }

    #[test]
    fn test_validation_maps_to_validation_error() {
        let err: ApiError = CoreError::Validation(ValidationError::Required {
            field: "shop".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "shop is required");
    }

    #[test]
    fn test_app_error_codes() {
        let err: ApiError = AppError::NoSnapshot.into();
        assert_eq!(err.code, ErrorCode::SnapshotError);

        let err: ApiError = AppError::InvalidConfig("max_page_size must be positive".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);

        let err: ApiError = AppError::ExportFailed("disk full".into()).into();
        assert_eq!(err.code, ErrorCode::ExportError);
        assert_eq!(err.to_string(), "[ExportError] Export failed: disk full");
    }
}
