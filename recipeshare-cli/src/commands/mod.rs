//! Subcommand implementations

pub mod check_db;
pub mod migrate;
pub mod serve;

pub use check_db::run_check_db;
pub use migrate::run_migrate;
pub use serve::run_serve;

use anyhow::{Context, Result};
use recipeshare_server::AppConfig;

/// Read `AppConfig` from the (already .env-populated) environment.
pub(crate) fn load_config() -> Result<AppConfig> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::debug!(database = ?config.database, pool = ?config.pool, "configuration loaded");
    Ok(config)
}
