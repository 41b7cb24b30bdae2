//! # medistock-core: Pure Inventory Logic for MediStock
//!
//! Every inventory screen (admin list, salesperson view, the inventory tables)
//! used to re-derive stock and expiry status on its own. This crate is the one
//! place that logic lives, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        MediStock Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Inventory REST backend (external)                  │   │
//! │  │        GET /inventory?page_size=1000  → snapshot                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ medistock-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │  stock ─┐                                                       │   │
//! │  │  expiry ┴─► filter ─► stats ─► pagination ─► view               │   │
//! │  │                                                                 │   │
//! │  │  pricing ─► validation        (inventory entry form)            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        medistock-cli (table view, export, price checks)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Inventory line, statuses, filter criteria, view shapes
//! - [`money`] - Integer cents with lenient decimal wire parsing
//! - [`lenient`] - Snapshot field readers that never reject a record's values
//! - [`stock`] - Stock status from total pieces and reorder level
//! - [`expiry`] - Expiry status relative to an injected reference time
//! - [`filter`] - Search and filter predicates over a snapshot
//! - [`pagination`] - 1-indexed page slicing
//! - [`stats`] - Single-pass aggregate counters
//! - [`pricing`] - Cost per piece and suggested selling price
//! - [`validation`] - Submission-time checks for inventory entries
//! - [`view`] - The assembled table view
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, inputs are never mutated
//! 2. **Injected Time**: every expiry computation takes its reference time
//! 3. **Integer Money**: all monetary values are cents (i64)
//! 4. **Lenient Data, Strict Contracts**: null counts and bad dates degrade to
//!    safe defaults; only caller mistakes surface as errors
//!
//! ## Example Usage
//!
//! ```rust
//! use medistock_core::{pricing, Money};
//!
//! let cost = pricing::derive_cost_per_piece(Money::from_major_minor(500, 0), 10)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(cost.cents(), 5000);
//!
//! let suggested = pricing::derive_suggested_selling_price(cost);
//! assert_eq!(suggested.cents(), 7000); // 65.00 → nearest 10 → 70.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod expiry;
pub mod filter;
pub mod lenient;
pub mod money;
pub mod pagination;
pub mod pricing;
pub mod stats;
pub mod stock;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Policy Constants
// =============================================================================

/// Days before expiry at which a line counts as "near expiry".
///
/// The boundary is inclusive: a line expiring in exactly 30 days is near.
pub const NEAR_EXPIRY_DAYS: i64 = 30;

/// Markup applied to cost per piece for the suggested selling price,
/// in basis points (13000 = ×1.30).
pub const SUGGESTED_MARKUP_BPS: i64 = 13_000;

/// Maximum number of digits (decimal point stripped) in a cost per piece.
pub const MAX_COST_DIGITS: usize = 10;

/// Maximum length of a free-text search query.
pub const MAX_SEARCH_LEN: usize = 100;
