//! # Snapshot State
//!
//! Holds the inventory snapshot every command queries.
//!
//! ## Thread Safety
//! The snapshot is wrapped in `Arc<RwLock<T>>`:
//! 1. Queries only read, so any number may run at once
//! 2. A reload takes the write lock and swaps the whole list
//! 3. Every query is a synchronous core call made under a read guard
//!
//! ## Accepted File Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bare list (exported table)     │  REST page (GET /inventory)           │
//! │  ─────────────────────────      │  ─────────────────────────            │
//! │  [                              │  {                                    │
//! │    { "id": 1, ... },            │    "count": 2,                        │
//! │    { "id": 2, ... }             │    "next": null,                      │
//! │  ]                              │    "results": [ { "id": 1, ... } ]    │
//! │                                 │  }                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use medistock_core::expiry::parse_expiry;
use medistock_core::InventoryLine;
use serde_json::Value;
use tokio::sync::{RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

/// A loaded snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Inventory lines in backend order.
    pub lines: Vec<InventoryLine>,

    /// File the lines were read from.
    pub source: Option<PathBuf>,

    /// When the file was read.
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Shared, reloadable snapshot.
#[derive(Debug, Clone, Default)]
pub struct SnapshotState {
    inner: Arc<RwLock<Snapshot>>,
}

impl SnapshotState {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a snapshot from lines already in memory.
    pub fn from_lines(lines: Vec<InventoryLine>) -> Self {
        SnapshotState {
            inner: Arc::new(RwLock::new(Snapshot {
                lines,
                source: None,
                loaded_at: None,
            })),
        }
    }

    /// Reads a snapshot file into a new state.
    pub async fn load(path: &Path) -> AppResult<Self> {
        let state = Self::new();
        state.reload(path).await?;
        Ok(state)
    }

    /// Replaces the snapshot with the contents of `path`.
    ///
    /// Returns the number of lines loaded. On error the previous snapshot
    /// is kept.
    pub async fn reload(&self, path: &Path) -> AppResult<usize> {
        debug!(?path, "Reading snapshot");

        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| AppError::SnapshotReadFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;

        let lines = parse_snapshot(&contents).map_err(|reason| AppError::SnapshotInvalid {
            path: path.to_path_buf(),
            reason,
        })?;

        let bad_dates = lines
            .iter()
            .filter(|line| has_unparsable_expiry(line))
            .count();
        if bad_dates > 0 {
            debug!(
                count = bad_dates,
                "Snapshot lines with unparsable expiry dates (treated as no expiry)"
            );
        }

        let count = lines.len();
        let mut snapshot = self.inner.write().await;
        *snapshot = Snapshot {
            lines,
            source: Some(path.to_path_buf()),
            loaded_at: Some(Utc::now()),
        };

        info!(?path, count, "Snapshot loaded");
        Ok(count)
    }

    /// Acquires a read guard on the snapshot.
    pub async fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.inner.read().await
    }

    /// Number of lines currently loaded.
    pub async fn len(&self) -> usize {
        self.inner.read().await.lines.len()
    }

    /// Whether no lines are loaded.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Parses snapshot JSON in either accepted shape.
///
/// Fields of the wrong type read as missing. A record that cannot be read
/// at all (not an object, no usable `id`) is skipped with a warning; only a
/// file of the wrong shape is an error.
pub fn parse_snapshot(json: &str) -> Result<Vec<InventoryLine>, String> {
    let value: Value = serde_json::from_str(json).map_err(|e| e.to_string())?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut page) => match page.remove("results") {
            Some(Value::Array(results)) => {
                if let Some(count) = page.get("count").and_then(Value::as_u64) {
                    debug!(count, "Snapshot is a paginated response");
                }
                results
            }
            _ => return Err("expected a list or an object with a \"results\" list".into()),
        },
        _ => return Err("expected a list of inventory lines".into()),
    };

    let total = records.len();
    let lines: Vec<InventoryLine> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(index, error = %e, "Skipping unreadable snapshot record");
                None
            }
        })
        .collect();

    if lines.len() < total {
        warn!(skipped = total - lines.len(), total, "Snapshot records skipped");
    }

    Ok(lines)
}

fn has_unparsable_expiry(line: &InventoryLine) -> bool {
    line.expiry_date
        .as_deref()
        .is_some_and(|raw| !raw.trim().is_empty() && parse_expiry(raw).is_none())
}
