//! Migration command

use anyhow::{Context, Result};

use recipeshare_server::create_pool;
use recipeshare_server::db::{close_pool, migrations};

use super::load_config;

/// Create tables and seed rank tiers
pub async fn run_migrate() -> Result<()> {
    let config = load_config()?;
    let pool = create_pool(&config.database, &config.pool);

    let result = migrations::run(&pool).await.context("Failed to run migrations");
    close_pool(&pool, config.shutdown_grace).await?;
    result?;

    println!("Migrations complete");
    Ok(())
}
