//! # MediStock CLI Library
//!
//! Command layer over an inventory snapshot. `main.rs` only parses
//! arguments and hands them to [`run`].
//!
//! ## Module Organization
//! ```text
//! medistock_cli/
//! ├── lib.rs          ◄─── You are here (CLI definition, startup, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (TOML + env)
//! │   └── snapshot.rs ◄─── SnapshotState (Arc<RwLock<Snapshot>>)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── inventory.rs◄─── list / stats / export / options
//! │   ├── pricing.rs  ◄─── price / check
//! │   └── config.rs   ◄─── config
//! └── error.rs        ◄─── AppError, ApiError
//! ```
//!
//! ## Output Streams
//! Results go to stdout as JSON (CSV for `export` without `--output`).
//! Logs and errors go to stderr, so stdout can be piped.

pub mod commands;
pub mod error;
pub mod state;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use medistock_core::{ExpiryFilter, FilterCriteria, StockFilter};

use crate::error::{ApiError, AppError, ErrorCode};
use crate::state::{AppConfig, SnapshotState, DEFAULT_LOG_FILTER};

// =============================================================================
// CLI Definition
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "medistock")]
#[command(version, about = "Pharmacy inventory snapshot tool", long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir / medistock.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Inventory snapshot JSON (overrides the configured path)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Filter flags shared by list, stats and export.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive search over name, generic name, batch, barcode, supplier
    #[arg(long)]
    pub search: Option<String>,

    /// Shop id
    #[arg(long)]
    pub shop: Option<i64>,

    /// Product id
    #[arg(long)]
    pub product: Option<i64>,

    /// all | in_stock | low_stock | out_of_stock
    #[arg(long, default_value = "all")]
    pub stock: StockFilter,

    /// all | good | expiring_soon | expired | no_expiry
    #[arg(long, default_value = "all")]
    pub expiry: ExpiryFilter,

    /// Dosage form, exact match
    #[arg(long)]
    pub form: Option<String>,
}

impl FilterArgs {
    /// Builds core filter criteria for one page.
    pub fn into_criteria(self, page: i64, page_size: i64) -> FilterCriteria {
        FilterCriteria {
            search: self.search,
            shop: self.shop,
            product: self.product,
            stock_status: self.stock,
            expiry_status: self.expiry,
            form: self.form,
            page,
            page_size,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// One page of the inventory table, with stats
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// 1-indexed page
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,

        /// Rows per page (capped at the configured maximum)
        #[arg(long, allow_negative_numbers = true)]
        page_size: Option<i64>,
    },

    /// Stats over every matching line
    Stats {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// CSV of every matching line
    Export {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Shops, products and forms present in the snapshot
    Options,

    /// Cost per piece and suggested selling price
    Price {
        /// Buying price per unit, e.g. 500 or 12.50
        #[arg(long)]
        buying_price: String,

        /// Pieces in one unit
        #[arg(long, allow_negative_numbers = true)]
        pieces_per_unit: i64,
    },

    /// Validate an inventory entry (form JSON) as on submit
    Check {
        /// Entry JSON file
        #[arg(long)]
        entry: PathBuf,

        /// Report every failing field instead of the first
        #[arg(long)]
        all_errors: bool,
    },

    /// Show the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

// =============================================================================
// Run
// =============================================================================

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// `check` ran and the entry failed validation.
    EntryInvalid,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::EntryInvalid => ExitCode::from(2),
        }
    }
}

/// Runs one CLI invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config: defaults → TOML file → MEDISTOCK_* env → --snapshot   │
/// │  2. Initialize logging (RUST_LOG wins over [logging] filter)           │
/// │  3. Load the snapshot (only for commands that query it)                │
/// │  4. Read the clock once, pass "now" into the command                   │
/// │  5. Print the result                                                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<Outcome, ApiError> {
    let config = AppConfig::load(cli.config.clone())?;
    execute(cli, config).await
}

/// Runs one invocation against an already loaded config.
///
/// `--snapshot` still takes precedence over the configured path.
pub async fn execute(cli: Cli, mut config: AppConfig) -> Result<Outcome, ApiError> {
    if let Some(path) = cli.snapshot {
        config.snapshot.path = Some(path);
    }

    init_tracing(&config.logging.filter);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting MediStock");

    let now = Utc::now();

    match cli.command {
        Command::List {
            filters,
            page,
            page_size,
        } => {
            let snapshot = open_snapshot(&config).await?;
            let criteria = filters.into_criteria(page, config.page_size(page_size));
            let view =
                commands::inventory::list_inventory(&snapshot, &config, criteria, now).await?;
            print_json(&view)?;
        }
        Command::Stats { filters } => {
            let snapshot = open_snapshot(&config).await?;
            let criteria = filters.into_criteria(1, config.listing.default_page_size);
            let stats =
                commands::inventory::inventory_stats(&snapshot, &config, criteria, now).await?;
            print_json(&stats)?;
        }
        Command::Export { filters, output } => {
            let snapshot = open_snapshot(&config).await?;
            let criteria = filters.into_criteria(1, config.listing.default_page_size);
            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path).map_err(|e| {
                        AppError::ExportFailed(format!("{}: {}", path.display(), e))
                    })?;
                    let summary = commands::inventory::export_inventory(
                        &snapshot,
                        &config,
                        criteria,
                        now,
                        std::io::BufWriter::new(file),
                    )
                    .await?;
                    print_json(&summary)?;
                }
                None => {
                    commands::inventory::export_inventory(
                        &snapshot,
                        &config,
                        criteria,
                        now,
                        std::io::stdout(),
                    )
                    .await?;
                }
            }
        }
        Command::Options => {
            let snapshot = open_snapshot(&config).await?;
            print_json(&commands::inventory::get_filter_options(&snapshot).await)?;
        }
        Command::Price {
            buying_price,
            pieces_per_unit,
        } => {
            let prices = commands::pricing::derive_entry_prices(&buying_price, pieces_per_unit)?;
            print_json(&prices)?;
        }
        Command::Check { entry, all_errors } => {
            let json = tokio::fs::read_to_string(&entry).await.map_err(|e| {
                ApiError::new(
                    ErrorCode::ValidationError,
                    format!("Failed to read entry {}: {}", entry.display(), e),
                )
            })?;
            let entry = commands::pricing::parse_entry(&json)?;
            let today = Local::now().date_naive();
            let report = commands::pricing::check_entry(&entry, today, all_errors);
            print_json(&report)?;
            if !report.valid {
                return Ok(Outcome::EntryInvalid);
            }
        }
        Command::Config { write } => {
            print_json(&commands::config::get_config(&config))?;
            if write {
                let path = commands::config::write_config(&config, cli.config)?;
                info!(?path, "Configuration written");
            }
        }
    }

    Ok(Outcome::Done)
}

/// Loads the configured snapshot.
async fn open_snapshot(config: &AppConfig) -> Result<SnapshotState, ApiError> {
    let path = config.snapshot.path.as_deref().ok_or(AppError::NoSnapshot)?;
    Ok(SnapshotState::load(path).await?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Writes a failed run's error to stderr as JSON.
pub fn report_error(err: &ApiError) {
    error!(code = ?err.code, "{}", err.message);
    let json = serde_json::to_string(err).unwrap_or_else(|_| err.to_string());
    eprintln!("{json}");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=medistock=trace` - Show trace for medistock crates only
/// - Otherwise the configured filter, default `info,medistock=debug`
///
/// Logs go to stderr. Calling this twice is a no-op.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
