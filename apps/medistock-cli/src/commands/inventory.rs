//! # Inventory Commands
//!
//! Table listing, stats, CSV export and filter options over the snapshot.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Query Flow                                 │
//! │                                                                         │
//! │  FilterCriteria (from CLI flags)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare_criteria: trim + length-check search, cap page_size           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  snapshot.read() ──► medistock_core::view::build_view(.., now)         │
//! │       │                                                                 │
//! │       ├──► list    → InventoryView (one page + stats)                  │
//! │       ├──► stats   → Stats over the filtered set                       │
//! │       └──► export  → CSV of every filtered row, same set as `list`     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use medistock_core::filter::{apply_filters, filter_options};
use medistock_core::stats::aggregate_stats;
use medistock_core::validation::validate_search_query;
use medistock_core::view::{build_view, filtered_rows};
use medistock_core::{
    ExpiryStatus, FilterCriteria, FilterOptions, InventoryRow, InventoryView, Money, Stats,
    StockStatus,
};

use crate::error::{ApiError, AppError};
use crate::state::{AppConfig, SnapshotState};

/// Normalizes caller criteria before they reach the core.
///
/// The search is trimmed (blank → none) and must be at most 100
/// characters; `page_size` is capped at the configured maximum.
pub fn prepare_criteria(
    mut criteria: FilterCriteria,
    config: &AppConfig,
) -> Result<FilterCriteria, ApiError> {
    criteria.search = match criteria.search.take() {
        Some(raw) => Some(validate_search_query(&raw)?).filter(|q| !q.is_empty()),
        None => None,
    };
    criteria.page_size = criteria.page_size.min(config.listing.max_page_size);
    Ok(criteria)
}

/// Returns one page of the inventory table with stats.
pub async fn list_inventory(
    snapshot: &SnapshotState,
    config: &AppConfig,
    criteria: FilterCriteria,
    now: DateTime<Utc>,
) -> Result<InventoryView, ApiError> {
    let start = Instant::now();
    let criteria = prepare_criteria(criteria, config)?;

    debug!(?criteria, "list_inventory command");

    let snapshot = snapshot.read().await;
    let view = build_view(&snapshot.lines, &criteria, now);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = view.items.len(),
        total = view.total_count,
        page = view.page,
        "list_inventory complete"
    );

    Ok(view)
}

/// Returns stats over every line matching the filters.
pub async fn inventory_stats(
    snapshot: &SnapshotState,
    config: &AppConfig,
    criteria: FilterCriteria,
    now: DateTime<Utc>,
) -> Result<Stats, ApiError> {
    let start = Instant::now();
    let criteria = prepare_criteria(criteria, config)?;

    debug!(?criteria, "inventory_stats command");

    let snapshot = snapshot.read().await;
    let matched = apply_filters(&snapshot.lines, &criteria, now);
    let stats = aggregate_stats(matched.iter().copied(), now);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = stats.total_items,
        "inventory_stats complete"
    );

    Ok(stats)
}

/// Distinct shops, products and forms, for filter dropdowns.
pub async fn get_filter_options(snapshot: &SnapshotState) -> FilterOptions {
    debug!("get_filter_options command");
    let snapshot = snapshot.read().await;
    filter_options(&snapshot.lines)
}

// =============================================================================
// CSV Export
// =============================================================================

/// CSV header, in `ExportRecord` field order.
const EXPORT_COLUMNS: [&str; 19] = [
    "id",
    "product",
    "generic_name",
    "batch_number",
    "barcode",
    "supplier",
    "shop",
    "form",
    "total_units",
    "pieces_per_unit",
    "total_pieces",
    "reorder_level",
    "stock_status",
    "expiry_date",
    "days_to_expiry",
    "expiry_status",
    "cost_price_per_piece",
    "selling_price_per_piece",
    "stock_value",
];

/// One CSV row.
#[derive(Debug, Serialize)]
struct ExportRecord<'a> {
    id: i64,
    product: Option<&'a str>,
    generic_name: Option<&'a str>,
    batch_number: Option<&'a str>,
    barcode: Option<&'a str>,
    supplier: Option<&'a str>,
    shop: Option<i64>,
    form: Option<&'a str>,
    total_units: Option<i64>,
    pieces_per_unit: Option<i64>,
    total_pieces: i64,
    reorder_level: Option<i64>,
    stock_status: &'static str,
    expiry_date: Option<&'a str>,
    days_to_expiry: Option<i64>,
    expiry_status: &'static str,
    cost_price_per_piece: Option<String>,
    selling_price_per_piece: Option<String>,
    stock_value: String,
}

impl<'a> From<&'a InventoryRow> for ExportRecord<'a> {
    fn from(row: &'a InventoryRow) -> Self {
        let line = &row.line;
        ExportRecord {
            id: line.id,
            product: line.product_name.as_deref(),
            generic_name: line.product_generic_name.as_deref(),
            batch_number: line.batch_number.as_deref(),
            barcode: line.barcode.as_deref(),
            supplier: line.supplier.as_deref(),
            shop: line.shop,
            form: line.form.as_deref(),
            total_units: line.total_units,
            pieces_per_unit: line.pieces_per_unit,
            total_pieces: row.total_pieces,
            reorder_level: line.reorder_level,
            stock_status: stock_label(row.stock_status),
            expiry_date: line.expiry_date.as_deref(),
            days_to_expiry: row.days_to_expiry,
            expiry_status: expiry_label(row.expiry_status),
            cost_price_per_piece: line.cost_price_per_piece.map(|m| m.to_string()),
            selling_price_per_piece: line.selling_price_per_piece.map(|m| m.to_string()),
            stock_value: line.stock_value().to_string(),
        }
    }
}

fn stock_label(status: StockStatus) -> &'static str {
    match status {
        StockStatus::InStock => "In Stock",
        StockStatus::LowStock => "Low Stock",
        StockStatus::OutOfStock => "Out of Stock",
    }
}

fn expiry_label(status: ExpiryStatus) -> &'static str {
    match status {
        ExpiryStatus::Fresh => "Good",
        ExpiryStatus::NearExpiry => "Expiring Soon",
        ExpiryStatus::Expired => "Expired",
        ExpiryStatus::NoExpiry => "No Expiry",
    }
}

/// Summary of a finished export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub rows: usize,
    pub total_value: Money,
}

/// Writes every filtered row as CSV.
///
/// Uses the same filtered set the table pages over; `page` and
/// `page_size` are ignored. The header is written even when nothing matches.
pub async fn export_inventory<W: Write>(
    snapshot: &SnapshotState,
    config: &AppConfig,
    criteria: FilterCriteria,
    now: DateTime<Utc>,
    writer: W,
) -> Result<ExportSummary, ApiError> {
    let start = Instant::now();
    let criteria = prepare_criteria(criteria, config)?;

    debug!(?criteria, "export_inventory command");

    let rows = {
        let snapshot = snapshot.read().await;
        filtered_rows(&snapshot.lines, &criteria, now)
    };

    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(EXPORT_COLUMNS).map_err(AppError::from)?;
    for row in &rows {
        csv.serialize(ExportRecord::from(row)).map_err(AppError::from)?;
    }
    csv.flush()
        .map_err(|e| AppError::ExportFailed(e.to_string()))?;

    let summary = ExportSummary {
        rows: rows.len(),
        total_value: rows.iter().map(|row| row.line.stock_value()).sum(),
    };

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = summary.rows,
        "export_inventory complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use medistock_core::{ExpiryFilter, InventoryLine, StockFilter};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn state() -> SnapshotState {
        SnapshotState::from_lines(vec![
            InventoryLine {
                product_name: Some("Paracetamol 500mg".into()),
                batch_number: Some("PX-1".into()),
                total_units: Some(3),
                pieces_per_unit: Some(10),
                reorder_level: Some(50),
                selling_price_per_piece: Some(Money::from_cents(250)),
                expiry_date: Some("2025-06-20".into()),
                shop: Some(1),
                product: Some(4),
                form: Some("Tablet".into()),
                ..InventoryLine::new(1)
            },
            InventoryLine {
                product_name: Some("Cough Syrup".into()),
                supplier: Some("HealthCo, Ltd".into()),
                total_units: Some(12),
                selling_price_per_piece: Some(Money::from_cents(18_000)),
                shop: Some(2),
                form: Some("Syrup".into()),
                ..InventoryLine::new(2)
            },
            InventoryLine {
                product_name: Some("Amoxicillin".into()),
                expiry_date: Some("2025-05-01".into()),
                shop: Some(1),
                product: Some(5),
                ..InventoryLine::new(3)
            },
        ])
    }

    #[test]
    fn test_prepare_criteria() {
        let config = AppConfig::default();
        let criteria = FilterCriteria {
            search: Some("   ".into()),
            page_size: 5000,
            ..Default::default()
        };
        let prepared = prepare_criteria(criteria, &config).unwrap();
        assert_eq!(prepared.search, None);
        assert_eq!(prepared.page_size, 1000);

        let criteria = FilterCriteria {
            search: Some(" para ".into()),
            ..Default::default()
        };
        assert_eq!(
            prepare_criteria(criteria, &config).unwrap().search.as_deref(),
            Some("para")
        );

        let criteria = FilterCriteria {
            search: Some("x".repeat(101)),
            ..Default::default()
        };
        let err = prepare_criteria(criteria, &config).unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_list_inventory() {
        let criteria = FilterCriteria {
            shop: Some(1),
            ..Default::default()
        };
        let view = list_inventory(&state(), &AppConfig::default(), criteria, now())
            .await
            .unwrap();
        assert_eq!(view.total_count, 2);
        assert_eq!(view.stats.low_stock, 1);
        assert_eq!(view.stats.out_of_stock, 1);
        assert_eq!(view.stats.expired, 1);
    }

    #[tokio::test]
    async fn test_inventory_stats() {
        let criteria = FilterCriteria {
            stock_status: StockFilter::InStock,
            ..Default::default()
        };
        let stats = inventory_stats(&state(), &AppConfig::default(), criteria, now())
            .await
            .unwrap();
        assert_eq!(stats.total_items, 1);
        assert_eq!(stats.total_value, Money::from_cents(216_000));
    }

    #[tokio::test]
    async fn test_filter_options() {
        let options = get_filter_options(&state()).await;
        assert_eq!(options.shops, vec![1, 2]);
        assert_eq!(options.products.len(), 2);
        assert_eq!(options.forms, vec!["Syrup".to_string(), "Tablet".to_string()]);
    }

    #[tokio::test]
    async fn test_export_matches_filtered_set() {
        let criteria = FilterCriteria {
            expiry_status: ExpiryFilter::NoExpiry,
            page_size: 1,
            page: 7,
            ..Default::default()
        };
        let mut out = Vec::new();
        let summary = export_inventory(&state(), &AppConfig::default(), criteria, now(), &mut out)
            .await
            .unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.total_value, Money::from_cents(216_000));

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert_eq!(header, EXPORT_COLUMNS.join(","));
        let row = lines.next().unwrap();
        assert_eq!(row.matches(',').count(), EXPORT_COLUMNS.len()); // one quoted comma
        assert!(row.starts_with("2,Cough Syrup,"));
        // Commas inside fields are quoted
        assert!(row.contains("\"HealthCo, Ltd\""));
        assert!(row.contains("In Stock"));
        assert!(row.contains("No Expiry"));
        assert!(row.ends_with("180.00,2160.00"));
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_export_empty_result_writes_header_only() {
        let criteria = FilterCriteria {
            search: Some("nothing matches this".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        let summary = export_inventory(&state(), &AppConfig::default(), criteria, now(), &mut out)
            .await
            .unwrap();
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.total_value, Money::zero());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n", EXPORT_COLUMNS.join(",")));
    }
}
