//! # Commands Module
//!
//! Every operation the CLI exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── inventory.rs  ◄─── list, stats, export, filter options
//! ├── pricing.rs    ◄─── price derivation, entry checks
//! └── config.rs     ◄─── effective configuration
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Needs the snapshot and the page size limits
//! async fn list_inventory(snapshot: &SnapshotState, config: &AppConfig, ...)
//!
//! // Needs the snapshot only
//! async fn get_filter_options(snapshot: &SnapshotState)
//!
//! // Needs no state at all
//! fn derive_entry_prices(buying_price_per_unit: &str, pieces_per_unit: i64)
//! ```
//!
//! Commands that depend on "now" take it as a parameter; only `lib.rs`
//! reads the clock.

pub mod config;
pub mod inventory;
pub mod pricing;
