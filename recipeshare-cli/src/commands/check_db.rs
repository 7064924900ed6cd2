//! Database connectivity check

use anyhow::{Context, Result};

use recipeshare_server::create_pool;
use recipeshare_server::db::{close_pool, verify_pool};

use super::load_config;

/// Run `SELECT 1` once through the pool
pub async fn run_check_db() -> Result<()> {
    let config = load_config()?;
    let pool = create_pool(&config.database, &config.pool);

    let result = verify_pool(&pool).await.with_context(|| {
        format!(
            "Database {}:{}/{} is not reachable",
            config.database.host, config.database.port, config.database.service_name
        )
    });
    close_pool(&pool, config.shutdown_grace).await?;
    result?;

    println!("Database connection successful");
    Ok(())
}
