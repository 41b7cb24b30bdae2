//! # Domain Types
//!
//! Types shared by every inventory view.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  InventoryLine  │   │  StockStatus    │   │  ExpiryStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  InStock        │   │  Fresh          │       │
//! │  │  total_units    │   │  LowStock       │   │  NearExpiry     │       │
//! │  │  pieces_per_unit│   │  OutOfStock     │   │  Expired        │       │
//! │  │  reorder_level  │   └─────────────────┘   │  NoExpiry       │       │
//! │  │  expiry_date    │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ FilterCriteria  │──►│  InventoryRow   │──►│  InventoryView  │       │
//! │  │  search, shop   │   │  line + derived │   │  items, stats   │       │
//! │  │  stock, expiry  │   │  statuses       │   │  total_count    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shapes
//! Field names follow the inventory REST backend (snake_case). Filter
//! criteria use the query names the inventory pages send
//! (`stockStatus`, `expiryStatus`, `page_size`).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lenient;
use crate::money::{self, Money};

// =============================================================================
// Inventory Line
// =============================================================================

/// One stocked batch of a product in one shop.
///
/// Every field except `id` may be missing in a snapshot record. Values of the
/// wrong JSON type read as missing (see [`crate::lenient`]), and counts default
/// to safe values at read time (see [`InventoryLine::total_pieces`]), so one
/// malformed record never poisons the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryLine {
    /// Unique identifier assigned by the backend.
    #[serde(deserialize_with = "lenient::id")]
    pub id: i64,

    /// Count of container units (boxes, bottles).
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_units: Option<i64>,

    /// Pieces contained in one unit.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub pieces_per_unit: Option<i64>,

    /// Threshold, in pieces, at or below which stock is low.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub reorder_level: Option<i64>,

    /// Expiry date (`YYYY-MM-DD` or a date-time string).
    #[serde(default, deserialize_with = "lenient::text")]
    pub expiry_date: Option<String>,

    /// Purchase date (`YYYY-MM-DD` or a date-time string).
    #[serde(default, deserialize_with = "lenient::text")]
    pub purchase_date: Option<String>,

    #[serde(default, with = "money::wire")]
    #[ts(type = "string | null")]
    pub cost_price_per_piece: Option<Money>,

    #[serde(default, with = "money::wire")]
    #[ts(type = "string | null")]
    pub selling_price_per_piece: Option<Money>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub product_generic_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub batch_number: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub barcode: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub supplier: Option<String>,

    /// Shop id.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub shop: Option<i64>,

    /// Product id.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub product: Option<i64>,

    /// Dosage form ("Tablet", "Syrup", ...).
    #[serde(default, deserialize_with = "lenient::text")]
    pub form: Option<String>,

    /// Purchase order this batch arrived on.
    #[serde(default, deserialize_with = "lenient::integer")]
    pub purchase_order: Option<i64>,
}

impl InventoryLine {
    /// Creates an empty line with the given id.
    pub fn new(id: i64) -> Self {
        InventoryLine {
            id,
            ..Default::default()
        }
    }

    /// Canonical stock quantity: `total_units × pieces_per_unit`.
    ///
    /// Missing units count as 0, a missing multiplier as 1. Never negative.
    ///
    /// ```rust
    /// use medistock_core::InventoryLine;
    ///
    /// let mut line = InventoryLine::new(1);
    /// line.total_units = Some(4);
    /// assert_eq!(line.total_pieces(), 4); // pieces_per_unit missing → 1
    /// line.pieces_per_unit = Some(10);
    /// assert_eq!(line.total_pieces(), 40);
    /// ```
    pub fn total_pieces(&self) -> i64 {
        let units = self.total_units.unwrap_or(0);
        let per_unit = self.pieces_per_unit.unwrap_or(1);
        units.saturating_mul(per_unit).max(0)
    }

    /// Reorder threshold in pieces (missing → 0).
    #[inline]
    pub fn reorder_threshold(&self) -> i64 {
        self.reorder_level.unwrap_or(0)
    }

    /// Selling price per piece (missing → 0).
    #[inline]
    pub fn selling_price(&self) -> Money {
        self.selling_price_per_piece.unwrap_or_default()
    }

    /// Value of the stock on hand at selling price.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.selling_price().multiply_quantity(self.total_pieces())
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// Stock status derived from total pieces and the reorder level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

/// Expiry status derived from the expiry date and a reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// More than 30 days left.
    Fresh,
    /// 0 to 30 days left (inclusive on both ends).
    NearExpiry,
    /// Past its expiry date.
    Expired,
    /// No usable expiry date.
    NoExpiry,
}

// =============================================================================
// Filter Categories
// =============================================================================

/// Stock category requested by the inventory page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockFilter {
    #[default]
    All,
    InStock,
    LowStock,
    OutOfStock,
}

impl StockFilter {
    /// Whether a line with `status` belongs to this category.
    pub fn accepts(&self, status: StockStatus) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::InStock => status == StockStatus::InStock,
            StockFilter::LowStock => status == StockStatus::LowStock,
            StockFilter::OutOfStock => status == StockStatus::OutOfStock,
        }
    }
}

impl std::str::FromStr for StockFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(StockFilter::All),
            "in_stock" => Ok(StockFilter::InStock),
            "low_stock" => Ok(StockFilter::LowStock),
            "out_of_stock" => Ok(StockFilter::OutOfStock),
            other => Err(format!(
                "Unknown stock status: '{}'. Valid options: all, in_stock, low_stock, out_of_stock",
                other
            )),
        }
    }
}

/// Expiry category requested by the inventory page.
///
/// `Good` is [`ExpiryStatus::Fresh`], `ExpiringSoon` is
/// [`ExpiryStatus::NearExpiry`]. `NoExpiry` matches lines without a usable
/// expiry date, never fresh ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryFilter {
    #[default]
    All,
    Good,
    ExpiringSoon,
    Expired,
    NoExpiry,
}

impl ExpiryFilter {
    /// Whether a line with `status` belongs to this category.
    pub fn accepts(&self, status: ExpiryStatus) -> bool {
        match self {
            ExpiryFilter::All => true,
            ExpiryFilter::Good => status == ExpiryStatus::Fresh,
            ExpiryFilter::ExpiringSoon => status == ExpiryStatus::NearExpiry,
            ExpiryFilter::Expired => status == ExpiryStatus::Expired,
            ExpiryFilter::NoExpiry => status == ExpiryStatus::NoExpiry,
        }
    }
}

impl std::str::FromStr for ExpiryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "" => Ok(ExpiryFilter::All),
            "good" => Ok(ExpiryFilter::Good),
            "expiring_soon" => Ok(ExpiryFilter::ExpiringSoon),
            "expired" => Ok(ExpiryFilter::Expired),
            "no_expiry" => Ok(ExpiryFilter::NoExpiry),
            other => Err(format!(
                "Unknown expiry status: '{}'. Valid options: all, good, expiring_soon, expired, no_expiry",
                other
            )),
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// Everything the inventory page can narrow a snapshot by.
///
/// Absent axes do not filter. All present axes are combined with AND.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterCriteria {
    /// Case-insensitive substring over name, generic name, batch, barcode,
    /// supplier.
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub shop: Option<i64>,

    #[serde(default)]
    pub product: Option<i64>,

    #[serde(default, rename = "stockStatus", alias = "stock_status")]
    pub stock_status: StockFilter,

    #[serde(default, rename = "expiryStatus", alias = "expiry_status")]
    pub expiry_status: ExpiryFilter,

    #[serde(default)]
    pub form: Option<String>,

    /// 1-indexed page.
    #[serde(default = "default_page")]
    pub page: i64,

    #[serde(default = "default_page_size", alias = "pageSize")]
    pub page_size: i64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            search: None,
            shop: None,
            product: None,
            stock_status: StockFilter::All,
            expiry_status: ExpiryFilter::All,
            form: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Derived Shapes
// =============================================================================

/// An inventory line with its derived quantities and statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub line: InventoryLine,

    pub total_pieces: i64,

    pub stock_status: StockStatus,

    pub expiry_status: ExpiryStatus,

    /// Whole days until expiry, rounded up. `None` without a usable date.
    pub days_to_expiry: Option<i64>,
}

/// Aggregate counters over a set of lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stats {
    pub total_items: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Lines with `0 < days_to_expiry <= 30`. Lines expiring today are not
    /// counted here even though they classify as near expiry.
    pub near_expiry: usize,
    /// Lines with `days_to_expiry < 0`.
    pub expired: usize,
    /// Σ total_pieces × selling_price_per_piece.
    pub total_value: Money,
}

/// One page of the filtered inventory plus stats over the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InventoryView {
    pub items: Vec<InventoryRow>,
    /// Number of lines matching the filters (all pages).
    pub total_count: usize,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: usize,
    pub stats: Stats,
}

/// A product choice in the filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductOption {
    pub id: i64,
    pub name: Option<String>,
}

/// Distinct values present in a snapshot, for populating filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterOptions {
    pub shops: Vec<i64>,
    pub products: Vec<ProductOption>,
    pub forms: Vec<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_pieces_defaults() {
        let line = InventoryLine::new(1);
        assert_eq!(line.total_pieces(), 0);

        let line = InventoryLine {
            total_units: Some(5),
            pieces_per_unit: None,
            ..InventoryLine::new(2)
        };
        assert_eq!(line.total_pieces(), 5);

        let line = InventoryLine {
            total_units: Some(5),
            pieces_per_unit: Some(0),
            ..InventoryLine::new(3)
        };
        assert_eq!(line.total_pieces(), 0);
    }

    #[test]
    fn test_total_pieces_never_negative() {
        let line = InventoryLine {
            total_units: Some(-3),
            pieces_per_unit: Some(10),
            ..InventoryLine::new(1)
        };
        assert_eq!(line.total_pieces(), 0);
    }

    #[test]
    fn test_line_deserializes_partial_record() {
        let line: InventoryLine = serde_json::from_value(json!({
            "id": 7,
            "total_units": null,
            "selling_price_per_piece": "25.00",
            "cost_price_per_piece": "not a number",
            "product_name": "Paracetamol 500mg"
        }))
        .unwrap();

        assert_eq!(line.id, 7);
        assert_eq!(line.total_units, None);
        assert_eq!(line.selling_price(), Money::from_cents(2500));
        assert_eq!(line.cost_price_per_piece, None);
        assert_eq!(line.product_name.as_deref(), Some("Paracetamol 500mg"));
    }

    #[test]
    fn test_line_with_wrongly_typed_fields_degrades() {
        let line: InventoryLine = serde_json::from_value(json!({
            "id": "12",
            "total_units": "5",
            "pieces_per_unit": 10.0,
            "reorder_level": "lots",
            "expiry_date": 20250101,
            "purchase_date": {"year": 2024},
            "shop": 2.5,
            "product_name": 42,
            "selling_price_per_piece": "1e28"
        }))
        .unwrap();

        assert_eq!(line.id, 12);
        assert_eq!(line.total_units, Some(5));
        assert_eq!(line.pieces_per_unit, Some(10));
        assert_eq!(line.total_pieces(), 50);
        assert_eq!(line.reorder_level, None);
        assert_eq!(line.expiry_date, None);
        assert_eq!(line.purchase_date, None);
        assert_eq!(line.shop, None);
        assert_eq!(line.product_name, None);
        assert_eq!(line.selling_price_per_piece, None);
        assert_eq!(line.stock_value(), Money::zero());
    }

    #[test]
    fn test_stock_value() {
        let line = InventoryLine {
            total_units: Some(2),
            pieces_per_unit: Some(10),
            selling_price_per_piece: Some(Money::from_cents(2500)),
            ..InventoryLine::new(1)
        };
        assert_eq!(line.stock_value(), Money::from_cents(50_000));
    }

    #[test]
    fn test_filter_criteria_wire_names() {
        let criteria: FilterCriteria = serde_json::from_value(json!({
            "search": "para",
            "stockStatus": "low_stock",
            "expiryStatus": "expiring_soon",
            "page": 2,
            "page_size": 25
        }))
        .unwrap();

        assert_eq!(criteria.search.as_deref(), Some("para"));
        assert_eq!(criteria.stock_status, StockFilter::LowStock);
        assert_eq!(criteria.expiry_status, ExpiryFilter::ExpiringSoon);
        assert_eq!(criteria.page, 2);
        assert_eq!(criteria.page_size, 25);
    }

    #[test]
    fn test_filter_criteria_defaults() {
        let criteria: FilterCriteria = serde_json::from_value(json!({})).unwrap();
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(criteria.page, 1);
        assert_eq!(criteria.page_size, 10);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("in_stock".parse::<StockFilter>().unwrap(), StockFilter::InStock);
        assert_eq!("ALL".parse::<StockFilter>().unwrap(), StockFilter::All);
        assert!("plenty".parse::<StockFilter>().is_err());

        assert_eq!("good".parse::<ExpiryFilter>().unwrap(), ExpiryFilter::Good);
        assert_eq!("no_expiry".parse::<ExpiryFilter>().unwrap(), ExpiryFilter::NoExpiry);
        assert!("soon".parse::<ExpiryFilter>().is_err());
    }

    #[test]
    fn test_no_expiry_filter_does_not_accept_fresh() {
        assert!(ExpiryFilter::NoExpiry.accepts(ExpiryStatus::NoExpiry));
        assert!(!ExpiryFilter::NoExpiry.accepts(ExpiryStatus::Fresh));
        assert!(ExpiryFilter::Good.accepts(ExpiryStatus::Fresh));
    }

    #[test]
    fn test_row_flattens_line() {
        let row = InventoryRow {
            line: InventoryLine::new(3),
            total_pieces: 0,
            stock_status: StockStatus::OutOfStock,
            expiry_status: ExpiryStatus::NoExpiry,
            days_to_expiry: None,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["id"], json!(3));
        assert_eq!(value["stock_status"], json!("out_of_stock"));
        assert_eq!(value["expiry_status"], json!("no_expiry"));
    }
}
