//! HTTP server command
//!
//! Builds the pool, checks it, optionally migrates, then serves until a
//! shutdown signal. Exits non-zero if the pool fails to drain.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use recipeshare_server::db::{close_pool, migrations, verify_pool, PgPool};
use recipeshare_server::{create_pool, run_server};

use super::load_config;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (overrides PORT)
    #[arg(long, short = 'p', env = "PORT")]
    pub port: Option<u16>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Run migrations before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run migrations; on failure close the pool before returning the error.
async fn migrate_or_close(pool: &PgPool, grace: Duration) -> Result<()> {
    let result = migrations::run(pool)
        .await
        .context("Failed to run migrations");
    if result.is_err() {
        if let Err(e) = close_pool(pool, grace).await {
            tracing::warn!(error = %e, "Pool did not drain after failed migrations");
        }
    }
    result
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let mut config = load_config()?;
    if let Some(port) = args.port {
        config.bind_addr.set_port(port);
    }
    config.cors_permissive = args.cors_permissive;

    tracing::info!(
        db_host = %config.database.host,
        db_port = config.database.port,
        db_name = %config.database.service_name,
        max_connections = config.pool.max_connections,
        "Starting recipeshare server on {}",
        config.bind_addr
    );

    let pool = create_pool(&config.database, &config.pool);

    // An unreachable database does not stop the listener; requests fail
    // individually until it comes back.
    match verify_pool(&pool).await {
        Ok(()) => {
            tracing::info!("Database connection verified");
            if args.migrate {
                migrate_or_close(&pool, config.shutdown_grace).await?;
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Database not reachable at startup");
            if args.migrate {
                tracing::warn!("Skipping migrations: database not reachable");
            }
        }
    }

    // Run server (blocks until shutdown)
    run_server(pool, &config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipeshare_server::{DatabaseConfig, PoolSettings};

    #[tokio::test]
    async fn failed_migration_closes_pool() {
        let database = DatabaseConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DatabaseConfig::default()
        };
        let settings = PoolSettings {
            min_connections: 0,
            acquire_timeout: Duration::from_millis(500),
            ..PoolSettings::default()
        };
        let pool = create_pool(&database, &settings);

        let err = migrate_or_close(&pool, Duration::from_secs(1)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to run migrations"));
        assert!(pool.is_closed());
    }
}
