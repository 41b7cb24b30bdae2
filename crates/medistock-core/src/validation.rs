//! # Validation Module
//!
//! Submission-time checks for the inventory entry form.
//!
//! ## Rule Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  product → shop → batch_number → pieces_per_unit → total_units →       │
//! │  buying_price_per_unit → cost_price_per_piece digits →                 │
//! │  selling_price_per_piece → expiry_date                                 │
//! │                                                                         │
//! │  validate_entry      stops at the first failing rule                   │
//! │  validate_entry_all  runs every rule and returns all failures          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These run on submit, not per keystroke. Every error is scoped to one
//! field so the form can show it inline.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use medistock_core::validation::{validate_entry, InventoryEntry};
//! use medistock_core::ValidationError;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let entry = InventoryEntry { product: Some(7), ..Default::default() };
//!
//! let err = validate_entry(&entry, today).unwrap_err();
//! assert_eq!(err, ValidationError::Required { field: "shop".into() });
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, ValidationError};
use crate::expiry::parse_expiry;
use crate::money::{self, Money};
use crate::pricing::derive_cost_per_piece;
use crate::{MAX_COST_DIGITS, MAX_SEARCH_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Inventory Entry
// =============================================================================

/// What the inventory form submits for one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryEntry {
    #[serde(default)]
    pub product: Option<i64>,

    #[serde(default)]
    pub shop: Option<i64>,

    #[serde(default)]
    pub batch_number: Option<String>,

    #[serde(default)]
    pub pieces_per_unit: Option<i64>,

    #[serde(default)]
    pub total_units: Option<i64>,

    #[serde(default, with = "money::wire")]
    #[ts(type = "string | null")]
    pub buying_price_per_unit: Option<Money>,

    /// Usually derived from the buying price; sent along with the form.
    #[serde(default, with = "money::wire")]
    #[ts(type = "string | null")]
    pub cost_price_per_piece: Option<Money>,

    #[serde(default, with = "money::wire")]
    #[ts(type = "string | null")]
    pub selling_price_per_piece: Option<Money>,

    /// `YYYY-MM-DD`; blank means the batch does not expire.
    #[serde(default)]
    pub expiry_date: Option<String>,

    #[serde(default)]
    pub reorder_level: Option<i64>,

    #[serde(default)]
    pub purchase_date: Option<String>,

    #[serde(default)]
    pub purchase_order: Option<i64>,

    #[serde(default)]
    pub barcode: Option<String>,

    #[serde(default)]
    pub supplier: Option<String>,
}

type Rule = fn(&InventoryEntry, NaiveDate) -> ValidationResult<()>;

/// Every entry rule, in the order they are reported.
const ENTRY_RULES: [Rule; 9] = [
    |e, _| require_id("product", e.product),
    |e, _| require_id("shop", e.shop),
    |e, _| require_text("batch_number", e.batch_number.as_deref()),
    |e, _| require_positive("pieces_per_unit", e.pieces_per_unit.unwrap_or(0)),
    |e, _| require_positive("total_units", e.total_units.unwrap_or(0)),
    |e, _| require_positive_money("buying_price_per_unit", e.buying_price_per_unit),
    |e, _| check_cost_digits(e),
    |e, _| require_positive_money("selling_price_per_piece", e.selling_price_per_piece),
    |e, today| check_expiry(e.expiry_date.as_deref(), today),
];

/// Validates an entry, stopping at the first failing rule.
///
/// `today` is the caller's local date; an expiry on or before it is
/// rejected.
pub fn validate_entry(entry: &InventoryEntry, today: NaiveDate) -> ValidationResult<()> {
    ENTRY_RULES.iter().try_for_each(|rule| rule(entry, today))
}

/// Validates an entry and returns every failure, in rule order.
pub fn validate_entry_all(
    entry: &InventoryEntry,
    today: NaiveDate,
) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = ENTRY_RULES
        .iter()
        .filter_map(|rule| rule(entry, today).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// =============================================================================
// Field Rules
// =============================================================================

fn require_id(field: &str, id: Option<i64>) -> ValidationResult<()> {
    match id {
        Some(id) if id != 0 => Ok(()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

fn require_text(field: &str, text: Option<&str>) -> ValidationResult<()> {
    if text.map_or(true, |t| t.trim().is_empty()) {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn require_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn require_positive_money(field: &str, value: Option<Money>) -> ValidationResult<()> {
    if !value.is_some_and(|m| m.is_positive()) {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Applies the cost digit guard to the submitted cost, or to the cost the
/// form would derive when none was submitted.
fn check_cost_digits(entry: &InventoryEntry) -> ValidationResult<()> {
    let too_many = || ValidationError::TooManyDigits {
        field: "cost_price_per_piece".to_string(),
        max: MAX_COST_DIGITS,
    };

    let cost = match entry.cost_price_per_piece {
        Some(cost) => Some(cost),
        None => match derive_cost_per_piece(
            entry.buying_price_per_unit.unwrap_or_default(),
            entry.pieces_per_unit.unwrap_or(0),
        ) {
            Ok(cost) => cost,
            Err(CoreError::CostPriceTooLarge { .. }) => return Err(too_many()),
            Err(_) => None,
        },
    };

    match cost {
        Some(cost) if cost.digit_count() > MAX_COST_DIGITS => Err(too_many()),
        _ => Ok(()),
    }
}

fn check_expiry(expiry: Option<&str>, today: NaiveDate) -> ValidationResult<()> {
    let Some(raw) = expiry.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(());
    };

    let expiry = parse_expiry(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: "expiry_date".to_string(),
        reason: format!("'{raw}' is not a date"),
    })?;

    if expiry.date_naive() <= today {
        return Err(ValidationError::NotInFuture {
            field: "expiry_date".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Query Validators
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (no search filter)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
///
/// ```rust
/// use medistock_core::validation::validate_search_query;
///
/// assert_eq!(validate_search_query("  para ").unwrap(), "para");
/// assert!(validate_search_query(&"x".repeat(101)).is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
