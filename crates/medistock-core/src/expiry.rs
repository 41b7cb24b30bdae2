//! # Expiry Classification
//!
//! Days to expiry are whole days rounded **up**:
//!
//! ```text
//! days_to_expiry = ceil((expiry - reference) / 24h)
//!
//!   ──────────── -1 ┬ 0 ─────────────────── 30 ┬ 31 ──────────────► days
//!        EXPIRED    │       NEAR_EXPIRY         │      FRESH
//! ```
//!
//! A date-only expiry (`2025-03-01`) means midnight UTC of that day, so a few
//! hours after midnight the line still counts as expiring that day.
//!
//! The reference time is always a parameter. Nothing in this module reads
//! the clock; the caller decides what "now" is.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{ExpiryStatus, InventoryLine};
use crate::NEAR_EXPIRY_DAYS;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses an expiry date the way the backend sends it.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times, and naive date-times
/// (`YYYY-MM-DDTHH:MM:SS[.fff]`, `YYYY-MM-DD HH:MM:SS`) read as UTC.
/// Anything else is `None`: an unparsable expiry is treated as no expiry.
///
/// ```rust
/// use medistock_core::expiry::parse_expiry;
///
/// assert!(parse_expiry("2025-03-01").is_some());
/// assert!(parse_expiry("2025-03-01T10:30:00Z").is_some());
/// assert!(parse_expiry("31/02/2025").is_none());
/// ```
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Whole days from `reference` until `expiry`, rounded up.
///
/// `None` when there is no expiry date or it cannot be parsed.
pub fn days_to_expiry(expiry: Option<&str>, reference: DateTime<Utc>) -> Option<i64> {
    let expiry = parse_expiry(expiry?)?;
    let millis = (expiry - reference).num_milliseconds();
    Some(ceil_days(millis))
}

fn ceil_days(millis: i64) -> i64 {
    let whole = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        whole
    } else {
        whole + 1
    }
}

/// Classifies a number of days to expiry.
pub fn classify_days(days: Option<i64>) -> ExpiryStatus {
    match days {
        None => ExpiryStatus::NoExpiry,
        Some(d) if d < 0 => ExpiryStatus::Expired,
        Some(d) if d <= NEAR_EXPIRY_DAYS => ExpiryStatus::NearExpiry,
        Some(_) => ExpiryStatus::Fresh,
    }
}

/// Classifies an expiry date relative to `reference`.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use medistock_core::{expiry::classify_expiry, ExpiryStatus};
///
/// let today = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(classify_expiry(Some("2025-01-31"), today), ExpiryStatus::NearExpiry);
/// assert_eq!(classify_expiry(Some("2025-02-01"), today), ExpiryStatus::Fresh);
/// assert_eq!(classify_expiry(None, today), ExpiryStatus::NoExpiry);
/// ```
pub fn classify_expiry(expiry: Option<&str>, reference: DateTime<Utc>) -> ExpiryStatus {
    classify_days(days_to_expiry(expiry, reference))
}

/// Classifies a line's expiry date relative to `reference`.
pub fn classify_line_expiry(line: &InventoryLine, reference: DateTime<Utc>) -> ExpiryStatus {
    classify_expiry(line.expiry_date.as_deref(), reference)
}
