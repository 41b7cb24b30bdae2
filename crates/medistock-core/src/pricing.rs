//! # Pricing Derivation
//!
//! The inventory form derives per-piece prices from what was paid per unit.
//!
//! ```text
//! buying_price_per_unit ──÷ pieces_per_unit──► cost_price_per_piece
//!        500.00                  10                 50.0   (1 decimal)
//!                                                     │
//!                                                ×1.30, nearest 10
//!                                                     ▼
//!                                           suggested selling price
//!                                                   70.00
//! ```
//!
//! The suggestion is only offered to the user. The persisted selling price
//! is always what the user entered.
//!
//! All arithmetic is on integer cents. Rounding is half-up (toward positive
//! infinity on a tie), including for negative intermediate values.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::{MAX_COST_DIGITS, SUGGESTED_MARKUP_BPS};

/// Cents in one tenth of a major unit (cost precision).
const COST_STEP_CENTS: i128 = 10;

/// Cents in ten major units (suggestion precision).
const SUGGESTION_STEP_CENTS: i128 = 1_000;

/// Derived prices for the inventory form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct PriceDerivation {
    pub cost_price_per_piece: Money,
    pub suggested_selling_price: Money,
}

/// Cost of one piece, rounded to one decimal place.
///
/// Returns `Ok(None)` when either input is not positive; no cost can be
/// derived and the caller should reset downstream prices.
///
/// ## Errors
/// [`CoreError::CostPriceTooLarge`] when the cost has more than
/// [`MAX_COST_DIGITS`] digits.
///
/// ```rust
/// use medistock_core::{pricing::derive_cost_per_piece, Money};
///
/// let cost = derive_cost_per_piece(Money::from_major_minor(200, 0), 20).unwrap();
/// assert_eq!(cost, Some(Money::from_major_minor(10, 0)));
///
/// assert_eq!(derive_cost_per_piece(Money::zero(), 20).unwrap(), None);
/// assert_eq!(derive_cost_per_piece(Money::from_cents(100), 0).unwrap(), None);
/// ```
pub fn derive_cost_per_piece(
    buying_price_per_unit: Money,
    pieces_per_unit: i64,
) -> CoreResult<Option<Money>> {
    if !buying_price_per_unit.is_positive() || pieces_per_unit <= 0 {
        return Ok(None);
    }

    let tenths = round_half_up(
        i128::from(buying_price_per_unit.cents()),
        i128::from(pieces_per_unit) * COST_STEP_CENTS,
    );
    let cost = Money::from_cents(saturate(tenths * COST_STEP_CENTS));

    check_cost_digits(cost)?;
    Ok(Some(cost))
}

/// Suggested selling price: cost × 1.3, rounded to the nearest 10.
///
/// ```rust
/// use medistock_core::{pricing::derive_suggested_selling_price, Money};
///
/// // 10.0 × 1.3 = 13 → 10
/// assert_eq!(
///     derive_suggested_selling_price(Money::from_cents(1000)),
///     Money::from_cents(1000)
/// );
/// // 50.0 × 1.3 = 65 → 70 (ties go up)
/// assert_eq!(
///     derive_suggested_selling_price(Money::from_cents(5000)),
///     Money::from_cents(7000)
/// );
/// ```
pub fn derive_suggested_selling_price(cost_price_per_piece: Money) -> Money {
    // cents × bps / 10_000 gives the marked-up cents; fold that division
    // into the rounding step.
    let marked_up = i128::from(cost_price_per_piece.cents()) * i128::from(SUGGESTED_MARKUP_BPS);
    let tens = round_half_up(marked_up, SUGGESTION_STEP_CENTS * 10_000);
    Money::from_cents(saturate(tens * SUGGESTION_STEP_CENTS))
}

/// The whole form-level pricing flow.
///
/// When no cost is derivable both prices are zero.
pub fn derive_prices(
    buying_price_per_unit: Option<Money>,
    pieces_per_unit: Option<i64>,
) -> CoreResult<PriceDerivation> {
    let cost = derive_cost_per_piece(
        buying_price_per_unit.unwrap_or_default(),
        pieces_per_unit.unwrap_or(0),
    )?;

    Ok(match cost {
        Some(cost) => PriceDerivation {
            cost_price_per_piece: cost,
            suggested_selling_price: derive_suggested_selling_price(cost),
        },
        None => PriceDerivation {
            cost_price_per_piece: Money::zero(),
            suggested_selling_price: Money::zero(),
        },
    })
}

/// Rejects a cost per piece with too many digits.
pub fn check_cost_digits(cost: Money) -> CoreResult<()> {
    let digits = cost.digit_count();
    if digits > MAX_COST_DIGITS {
        return Err(CoreError::CostPriceTooLarge {
            value: cost,
            digits,
            max: MAX_COST_DIGITS,
        });
    }
    Ok(())
}

/// `floor(n / d + 1/2)` for a positive divisor.
fn round_half_up(numerator: i128, divisor: i128) -> i128 {
    (numerator * 2 + divisor).div_euclid(divisor * 2)
}

fn saturate(cents: i128) -> i64 {
    i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX })
}
