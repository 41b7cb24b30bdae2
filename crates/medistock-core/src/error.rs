//! # Error Types
//!
//! Domain-specific error types for medistock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  medistock-core errors (this file)                                     │
//! │  ├── CoreError        - Derivation guards                              │
//! │  └── ValidationError  - Field-scoped submission failures               │
//! │                                                                         │
//! │  medistock-cli errors (app)                                            │
//! │  └── ApiError         - What the caller sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → inline form message    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed *data* never produces an error here: null counts default,
//! unparsable dates become "no expiry". Only derivation guards and caller
//! mistakes are errors.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A derived cost per piece has more digits than the policy allows.
    ///
    /// ## When This Occurs
    /// ```text
    /// buying_price_per_unit = 99999999999.00, pieces_per_unit = 1
    ///      │
    ///      ▼
    /// cost per piece 99999999999 → 11 digits
    ///      │
    ///      ▼
    /// CostPriceTooLarge { digits: 11, max: 10 }
    /// ```
    #[error("Cost price per piece {value} has {digits} digits (max {max})")]
    CostPriceTooLarge {
        value: Money,
        digits: usize,
        max: usize,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::CostPriceTooLarge { .. } => "COST_PRICE_TOO_LARGE",
            CoreError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant is scoped to one form field so the UI can show it inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Numeric value has too many digits.
    #[error("{field} must have at most {max} digits")]
    TooManyDigits { field: String, max: usize },

    /// Date must be strictly after today.
    #[error("{field} must be a future date")]
    NotInFuture { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., unparsable date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The form field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::MustBePositive { field }
            | ValidationError::TooManyDigits { field, .. }
            | ValidationError::NotInFuture { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
