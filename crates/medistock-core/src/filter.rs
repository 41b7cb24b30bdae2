//! # Filter & Search Engine
//!
//! Narrows an in-memory snapshot by the inventory page's filter bar.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshot (≤1000 lines, fetched once)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Search ∧ Shop ∧ Product ∧ Stock ∧ Expiry ∧ Form   ◄── FilterAxis::ALL  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  matching lines, input order preserved                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every axis is an independent predicate over a single line, so applying
//! them one after another in any order gives the same set as applying them
//! together. The input slice is only borrowed.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::expiry::classify_line_expiry;
use crate::stock::classify_stock;
use crate::types::{FilterCriteria, FilterOptions, InventoryLine, ProductOption};

// =============================================================================
// Filter Axes
// =============================================================================

/// One independent filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterAxis {
    Search,
    Shop,
    Product,
    Stock,
    Expiry,
    Form,
}

impl FilterAxis {
    /// Every axis, in the order the filter bar shows them.
    pub const ALL: [FilterAxis; 6] = [
        FilterAxis::Search,
        FilterAxis::Shop,
        FilterAxis::Product,
        FilterAxis::Stock,
        FilterAxis::Expiry,
        FilterAxis::Form,
    ];
}

impl FilterCriteria {
    /// The search query, trimmed and case-folded, if it filters anything.
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether `line` passes a single axis.
    pub fn matches_axis(
        &self,
        axis: FilterAxis,
        line: &InventoryLine,
        reference: DateTime<Utc>,
    ) -> bool {
        self.axis_matches(axis, line, reference, self.search_needle().as_deref())
    }

    /// Whether `line` passes every axis.
    pub fn matches(&self, line: &InventoryLine, reference: DateTime<Utc>) -> bool {
        self.matches_with_needle(line, reference, self.search_needle().as_deref())
    }

    fn matches_with_needle(
        &self,
        line: &InventoryLine,
        reference: DateTime<Utc>,
        needle: Option<&str>,
    ) -> bool {
        FilterAxis::ALL
            .iter()
            .all(|axis| self.axis_matches(*axis, line, reference, needle))
    }

    /// `needle` is the prepared [`search_needle`](Self::search_needle).
    fn axis_matches(
        &self,
        axis: FilterAxis,
        line: &InventoryLine,
        reference: DateTime<Utc>,
        needle: Option<&str>,
    ) -> bool {
        match axis {
            FilterAxis::Search => needle.map_or(true, |needle| matches_search(line, needle)),
            FilterAxis::Shop => self.shop.map_or(true, |shop| line.shop == Some(shop)),
            FilterAxis::Product => self
                .product
                .map_or(true, |product| line.product == Some(product)),
            FilterAxis::Stock => self.stock_status.accepts(classify_stock(line)),
            FilterAxis::Expiry => self
                .expiry_status
                .accepts(classify_line_expiry(line, reference)),
            FilterAxis::Form => match self.form.as_deref() {
                Some(form) => line.form.as_deref() == Some(form),
                None => true,
            },
        }
    }
}

/// Case-insensitive substring match over the searchable text fields.
///
/// `needle` must already be lower-cased. Missing fields are skipped.
pub fn matches_search(line: &InventoryLine, needle: &str) -> bool {
    [
        &line.product_name,
        &line.product_generic_name,
        &line.batch_number,
        &line.barcode,
        &line.supplier,
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

// =============================================================================
// Operations
// =============================================================================

/// Returns the lines matching every filter, in input order.
///
/// Pagination fields of `criteria` are ignored here.
///
/// ```rust
/// use chrono::Utc;
/// use medistock_core::{filter::apply_filters, FilterCriteria, InventoryLine};
///
/// let lines = vec![
///     InventoryLine { product_name: Some("Amoxicillin".into()), ..InventoryLine::new(1) },
///     InventoryLine { product_name: Some("Ibuprofen".into()), ..InventoryLine::new(2) },
/// ];
/// let criteria = FilterCriteria { search: Some("AMOX".into()), ..Default::default() };
///
/// let found = apply_filters(&lines, &criteria, Utc::now());
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id, 1);
/// ```
pub fn apply_filters<'a>(
    lines: &'a [InventoryLine],
    criteria: &FilterCriteria,
    reference: DateTime<Utc>,
) -> Vec<&'a InventoryLine> {
    let needle = criteria.search_needle();
    lines
        .iter()
        .filter(|line| criteria.matches_with_needle(line, reference, needle.as_deref()))
        .collect()
}

/// Collects the distinct shops, products and forms present in `lines`.
///
/// Results are sorted; the first non-empty name seen names a product.
pub fn filter_options(lines: &[InventoryLine]) -> FilterOptions {
    let mut shops = BTreeSet::new();
    let mut products: BTreeMap<i64, Option<String>> = BTreeMap::new();
    let mut forms = BTreeSet::new();

    for line in lines {
        if let Some(shop) = line.shop {
            shops.insert(shop);
        }
        if let Some(product) = line.product {
            let name = products.entry(product).or_insert(None);
            if name.is_none() {
                *name = line.product_name.clone().filter(|n| !n.trim().is_empty());
            }
        }
        if let Some(form) = line.form.as_deref().filter(|f| !f.trim().is_empty()) {
            forms.insert(form.to_string());
        }
    }

    FilterOptions {
        shops: shops.into_iter().collect(),
        products: products
            .into_iter()
            .map(|(id, name)| ProductOption { id, name })
            .collect(),
        forms: forms.into_iter().collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
