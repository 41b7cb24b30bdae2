//! # Config Commands
//!
//! Shows or writes the effective configuration.

use std::path::PathBuf;

use tracing::debug;

use crate::error::ApiError;
use crate::state::AppConfig;

/// Gets the effective configuration (file + environment + defaults).
pub fn get_config(config: &AppConfig) -> AppConfig {
    debug!("get_config command");
    config.clone()
}

/// Writes the effective configuration to `path` (or the default location).
///
/// ## Returns
/// The path that was written.
pub fn write_config(config: &AppConfig, path: Option<PathBuf>) -> Result<PathBuf, ApiError> {
    debug!(?path, "write_config command");
    Ok(config.save(path)?)
}
