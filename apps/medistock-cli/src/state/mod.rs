//! # State Module
//!
//! Application state for the CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────┐        │
//! │  │     SnapshotState        │      │       AppConfig          │        │
//! │  │                          │      │                          │        │
//! │  │  Arc<RwLock<Snapshot>>   │      │  snapshot path           │        │
//! │  │  lines, source,          │      │  page size limits        │        │
//! │  │  loaded_at               │      │  log filter              │        │
//! │  └──────────────────────────┘      └──────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • SnapshotState: shared read access, write lock only on reload        │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands take only the state they need.

mod config;
mod snapshot;

pub use config::{
    AppConfig, ListingSettings, LoggingSettings, SnapshotSettings, CONFIG_FILE_NAME,
    DEFAULT_LOG_FILTER,
};
pub use snapshot::{parse_snapshot, Snapshot, SnapshotState};
