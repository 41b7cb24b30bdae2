//! # Pricing Commands
//!
//! Price derivation and submission checks for the inventory entry form.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use medistock_core::pricing::{derive_prices, PriceDerivation};
use medistock_core::validation::{validate_entry, validate_entry_all, InventoryEntry};
use medistock_core::{Money, ValidationError};

use crate::error::ApiError;

/// Derives cost per piece and the suggested selling price.
///
/// `buying_price_per_unit` is a major-unit decimal ("500", "12.50").
pub fn derive_entry_prices(
    buying_price_per_unit: &str,
    pieces_per_unit: i64,
) -> Result<PriceDerivation, ApiError> {
    debug!(
        buying_price_per_unit,
        pieces_per_unit, "derive_entry_prices command"
    );

    let buying = Money::parse_major(buying_price_per_unit).ok_or_else(|| {
        ApiError::validation(format!(
            "buying_price_per_unit '{}' is not an amount",
            buying_price_per_unit
        ))
    })?;

    let prices = derive_prices(Some(buying), Some(pieces_per_unit))?;

    info!(
        cost = %prices.cost_price_per_piece,
        suggested = %prices.suggested_selling_price,
        "derive_entry_prices complete"
    );
    Ok(prices)
}

/// One failed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<ValidationError> for FieldError {
    fn from(err: ValidationError) -> Self {
        FieldError {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of checking an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

/// Checks an inventory entry as the form would on submit.
///
/// By default only the first failing field is reported; `all_errors`
/// reports every failing field in the same order.
pub fn check_entry(entry: &InventoryEntry, today: NaiveDate, all_errors: bool) -> EntryReport {
    debug!(%today, all_errors, "check_entry command");

    let errors: Vec<FieldError> = if all_errors {
        match validate_entry_all(entry, today) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.into_iter().map(FieldError::from).collect(),
        }
    } else {
        validate_entry(entry, today)
            .err()
            .map(FieldError::from)
            .into_iter()
            .collect()
    };

    info!(errors = errors.len(), "check_entry complete");

    EntryReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Parses an entry from form JSON.
pub fn parse_entry(json: &str) -> Result<InventoryEntry, ApiError> {
    serde_json::from_str(json)
        .map_err(|e| ApiError::validation(format!("Invalid inventory entry: {}", e)))
}
