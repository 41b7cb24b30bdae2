//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Stock value over a 1000-line snapshot in floating point:               │
//! │    Σ pieces × 0.1  drifts a few paise per hundred lines                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Wire amounts ("25.00", 12.5) are parsed exactly with rust_decimal   │
//! │    and stored as i64 cents. All sums are integer sums.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use medistock_core::money::Money;
//!
//! let price = Money::from_cents(2500); // 25.00
//! let stock_value = price.multiply_quantity(20);
//! assert_eq!(stock_value.cents(), 50_000);
//!
//! // Wire amounts come in as major-unit decimals
//! assert_eq!(Money::parse_major("12.5"), Some(Money::from_cents(1250)));
//! assert_eq!(Money::parse_major("n/a"), None);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents / paise).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  buying_price_per_unit ──► cost_price_per_piece ──► suggested price     │
/// │                                                                         │
/// │  selling_price_per_piece × total_pieces ──► Stats.total_value           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use medistock_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts an exact decimal amount in major units to Money.
    ///
    /// Sub-cent precision is rounded half away from zero. Returns `None`
    /// when the amount does not fit in i64 cents.
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        let cents = amount
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        cents.to_i64().map(Money)
    }

    /// Parses a major-unit decimal string ("25.00", " 12.5 ", "-3").
    ///
    /// Returns `None` for anything that is not a plain decimal number.
    pub fn parse_major(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .ok()
            .and_then(Money::from_decimal)
    }

    /// Reads an amount from a JSON value (number or decimal string).
    ///
    /// Anything else (null, bool, garbage text) yields `None`.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => Money::parse_major(&n.to_string()),
            serde_json::Value::String(s) => Money::parse_major(s),
            _ => None,
        }
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the exact decimal value in major units.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Counts the digits of the amount as a plain decimal with trailing
    /// zeros dropped and the point removed.
    ///
    /// ## Example
    /// ```rust
    /// use medistock_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(5000).digit_count(), 2);  // "50"
    /// assert_eq!(Money::from_cents(1250).digit_count(), 3);  // "12.5"
    /// assert_eq!(Money::from_cents(5).digit_count(), 3);     // "0.05"
    /// ```
    pub fn digit_count(&self) -> usize {
        self.to_decimal()
            .normalize()
            .to_string()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .count()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use medistock_core::money::Money;
    ///
    /// let per_piece = Money::from_cents(250);
    /// assert_eq!(per_piece.multiply_quantity(20).cents(), 5000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering ("25.00", "-5.50"). Currency symbols are a
/// presentation concern and are left to the frontend.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for optional amounts exchanged with the inventory backend.
///
/// Serializes as a major-unit decimal string (`"25.00"`). Deserializes from a
/// number or a decimal string; anything unparsable becomes `None` rather
/// than failing the whole record.
///
/// ```rust
/// use medistock_core::money::{self, Money};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, with = "money::wire")]
///     price: Option<Money>,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"price": "12.50"}"#).unwrap();
/// assert_eq!(row.price, Some(Money::from_cents(1250)));
/// let row: Row = serde_json::from_str(r#"{"price": "abc"}"#).unwrap();
/// assert_eq!(row.price, None);
/// ```
pub mod wire {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Money>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(money) => serializer.serialize_str(&money.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(raw.as_ref().and_then(Money::from_json))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
