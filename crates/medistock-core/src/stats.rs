//! # Aggregate Statistics
//!
//! Dashboard counters computed in a single pass.
//!
//! ## Near-expiry counter
//! `Stats::near_expiry` counts lines with `0 < days <= 30`, which is narrower
//! than [`ExpiryStatus::NearExpiry`](crate::ExpiryStatus::NearExpiry)
//! (`0 <= days <= 30`). A line expiring today shows as "near expiry" in the
//! table but is not counted on the dashboard card. Both behaviours are kept
//! as they are; unifying them changes visible dashboard numbers.

use chrono::{DateTime, Utc};

use crate::expiry::days_to_expiry;
use crate::stock::classify_stock;
use crate::types::{InventoryLine, Stats, StockStatus};
use crate::NEAR_EXPIRY_DAYS;

/// Computes counters over `lines` in one linear pass.
///
/// ```rust
/// use chrono::Utc;
/// use medistock_core::{stats::aggregate_stats, InventoryLine};
///
/// let lines = vec![
///     InventoryLine { total_units: Some(0), ..InventoryLine::new(1) },
///     InventoryLine { total_units: Some(5), reorder_level: Some(10), ..InventoryLine::new(2) },
/// ];
/// let stats = aggregate_stats(lines.iter(), Utc::now());
/// assert_eq!(stats.total_items, 2);
/// assert_eq!(stats.out_of_stock, 1);
/// assert_eq!(stats.low_stock, 1);
/// ```
pub fn aggregate_stats<'a, I>(lines: I, reference: DateTime<Utc>) -> Stats
where
    I: IntoIterator<Item = &'a InventoryLine>,
{
    lines.into_iter().fold(Stats::default(), |mut stats, line| {
        stats.total_items += 1;

        match classify_stock(line) {
            StockStatus::InStock => stats.in_stock += 1,
            StockStatus::LowStock => stats.low_stock += 1,
            StockStatus::OutOfStock => stats.out_of_stock += 1,
        }

        match days_to_expiry(line.expiry_date.as_deref(), reference) {
            Some(days) if days < 0 => stats.expired += 1,
            Some(days) if days > 0 && days <= NEAR_EXPIRY_DAYS => stats.near_expiry += 1,
            _ => {}
        }

        stats.total_value += line.stock_value();
        stats
    })
}
