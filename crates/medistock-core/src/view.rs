//! # Inventory View
//!
//! The assembled table view every inventory screen renders.
//!
//! ```text
//! snapshot ──► apply_filters ──┬──► aggregate_stats ────────────┐
//!                              │                                 ├──► InventoryView
//!                              └──► paginate ──► classify_line ──┘
//! ```
//!
//! Stats describe the whole filtered set, not just the visible page.
//! [`filtered_rows`] returns exactly the set the table pages over, which is
//! what exports must use so a download matches what is on screen.

use chrono::{DateTime, Utc};

use crate::expiry::{classify_days, days_to_expiry};
use crate::filter::apply_filters;
use crate::pagination::{paginate, total_pages};
use crate::stats::aggregate_stats;
use crate::stock::classify_stock;
use crate::types::{FilterCriteria, InventoryLine, InventoryRow, InventoryView};

/// Attaches derived quantities and statuses to a line.
pub fn classify_line(line: &InventoryLine, reference: DateTime<Utc>) -> InventoryRow {
    let days = days_to_expiry(line.expiry_date.as_deref(), reference);
    InventoryRow {
        line: line.clone(),
        total_pieces: line.total_pieces(),
        stock_status: classify_stock(line),
        expiry_status: classify_days(days),
        days_to_expiry: days,
    }
}

/// Every line matching `criteria`, classified, in snapshot order.
///
/// Ignores `page` and `page_size`.
pub fn filtered_rows(
    lines: &[InventoryLine],
    criteria: &FilterCriteria,
    reference: DateTime<Utc>,
) -> Vec<InventoryRow> {
    apply_filters(lines, criteria, reference)
        .into_iter()
        .map(|line| classify_line(line, reference))
        .collect()
}

/// Builds one page of the inventory table.
///
/// ```rust
/// use chrono::Utc;
/// use medistock_core::{view::build_view, FilterCriteria, InventoryLine};
///
/// let lines: Vec<InventoryLine> = (1..=25)
///     .map(|id| InventoryLine { total_units: Some(id), ..InventoryLine::new(id) })
///     .collect();
/// let criteria = FilterCriteria { page: 3, ..Default::default() };
///
/// let view = build_view(&lines, &criteria, Utc::now());
/// assert_eq!(view.items.len(), 5);
/// assert_eq!(view.total_count, 25);
/// assert_eq!(view.total_pages, 3);
/// assert_eq!(view.stats.total_items, 25);
/// ```
pub fn build_view(
    lines: &[InventoryLine],
    criteria: &FilterCriteria,
    reference: DateTime<Utc>,
) -> InventoryView {
    let matched = apply_filters(lines, criteria, reference);
    let stats = aggregate_stats(matched.iter().copied(), reference);
    let page = paginate(&matched, criteria.page, criteria.page_size);

    InventoryView {
        items: page
            .items
            .iter()
            .map(|line| classify_line(line, reference))
            .collect(),
        total_count: matched.len(),
        page: criteria.page.max(1),
        page_size: criteria.page_size.max(1),
        total_pages: total_pages(matched.len(), criteria.page_size),
        stats,
    }
}
