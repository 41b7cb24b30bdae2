//! # Stock Classification
//!
//! ```text
//! total_pieces = total_units × pieces_per_unit      (null → 0, null → 1)
//!
//!   0 ─────────────┬──────────── reorder ─────────────────────────► pieces
//!   │ OUT_OF_STOCK │        LOW_STOCK     │         IN_STOCK
//!   │   (== 0)     │  (0 < p <= reorder)  │       (p > reorder)
//! ```
//!
//! The reorder level is inclusive: a line sitting exactly at its reorder
//! level is low. Comparisons always use pieces, never raw units.

use crate::types::{InventoryLine, StockStatus};

/// Classifies a line by its total pieces and reorder level.
///
/// Total over all inputs: missing counts take their defaults and nothing
/// here can fail.
///
/// ```rust
/// use medistock_core::{stock::classify_stock, InventoryLine, StockStatus};
///
/// let line = InventoryLine {
///     total_units: Some(1),
///     pieces_per_unit: Some(10),
///     reorder_level: Some(10),
///     ..InventoryLine::new(1)
/// };
/// assert_eq!(classify_stock(&line), StockStatus::LowStock);
/// ```
pub fn classify_stock(line: &InventoryLine) -> StockStatus {
    classify_pieces(line.total_pieces(), line.reorder_threshold())
}

/// Classifies a raw piece count against a reorder threshold.
pub fn classify_pieces(total_pieces: i64, reorder_level: i64) -> StockStatus {
    if total_pieces <= 0 {
        StockStatus::OutOfStock
    } else if total_pieces <= reorder_level {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(units: Option<i64>, per_unit: Option<i64>, reorder: Option<i64>) -> InventoryLine {
        InventoryLine {
            total_units: units,
            pieces_per_unit: per_unit,
            reorder_level: reorder,
            ..InventoryLine::new(1)
        }
    }

    #[test]
    fn test_out_of_stock() {
        assert_eq!(classify_stock(&line(Some(0), Some(10), Some(5))), StockStatus::OutOfStock);
        assert_eq!(classify_stock(&line(None, None, None)), StockStatus::OutOfStock);
    }

    #[test]
    fn test_reorder_level_is_inclusive() {
        assert_eq!(classify_stock(&line(Some(10), Some(1), Some(10))), StockStatus::LowStock);
        assert_eq!(classify_stock(&line(Some(11), Some(1), Some(10))), StockStatus::InStock);
    }

    #[test]
    fn test_compares_pieces_not_units() {
        // 2 boxes of 10 = 20 pieces, reorder at 15 pieces
        assert_eq!(classify_stock(&line(Some(2), Some(10), Some(15))), StockStatus::InStock);
        // 1 box of 10 = 10 pieces
        assert_eq!(classify_stock(&line(Some(1), Some(10), Some(15))), StockStatus::LowStock);
    }

    #[test]
    fn test_missing_pieces_per_unit_does_not_zero_stock() {
        assert_eq!(classify_stock(&line(Some(5), None, Some(2))), StockStatus::InStock);
    }

    #[test]
    fn test_missing_reorder_level() {
        assert_eq!(classify_stock(&line(Some(1), Some(1), None)), StockStatus::InStock);
    }
}
