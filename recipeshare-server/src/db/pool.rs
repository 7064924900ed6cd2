//! Connection provider
//!
//! Uses a lazily connecting sqlx `PgPool` with explicit bounds. Handlers
//! never touch the pool directly; repositories borrow one connection per
//! statement through [`with_connection`].

use std::time::Duration;

use futures::future::BoxFuture;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};

use super::DbError;
use crate::config::DatabaseConfig;

/// Pool bounds and timeouts.
///
/// Kept small: the service runs a handful of short statements per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub min_connections: u32,
    pub max_connections: u32,
    /// Idle connections above `min_connections` are closed after this
    pub idle_timeout: Duration,
    /// Requests waiting longer than this for a connection fail
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 3,
            idle_timeout: Duration::from_secs(60),
            acquire_timeout: Duration::from_secs(10),
        }
    }
}

/// Error closing the pool at shutdown
#[derive(Debug, thiserror::Error)]
pub enum ShutdownError {
    #[error("pool did not drain within {0:?}")]
    DrainTimeout(Duration),
}

/// Create the PostgreSQL connection pool.
///
/// No connection is opened here. An unreachable server surfaces later,
/// per request, as [`DbError::Unavailable`].
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&config.database, &config.pool);
/// verify_pool(&pool).await.ok();
/// ```
pub fn create_pool(database: &DatabaseConfig, settings: &PoolSettings) -> PgPool {
    PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.acquire_timeout)
        .connect_lazy_with(database.connect_options())
}

/// Run `action` with one pooled connection.
///
/// The connection goes back to the pool when this function returns,
/// whether `action` succeeded, failed, or the future was dropped.
/// Errors from `action` are returned unchanged.
pub async fn with_connection<T, F>(pool: &PgPool, action: F) -> Result<T, DbError>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>>,
{
    let mut conn = pool.acquire().await.map_err(|e| {
        tracing::warn!(error = %e, "failed to acquire database connection");
        DbError::Unavailable(e)
    })?;

    let result = action(&mut *conn).await;
    drop(conn);

    if let Err(e) = &result {
        tracing::debug!(error = %e, "database action failed");
    }
    result
}

/// Check that the database answers a trivial query.
pub async fn verify_pool(pool: &PgPool) -> Result<(), DbError> {
    with_connection(pool, |conn| {
        Box::pin(async move {
            sqlx::query("SELECT 1").execute(&mut *conn).await?;
            Ok::<_, DbError>(())
        })
    })
    .await
}

/// Close the pool, waiting at most `grace` for checked-out connections.
pub async fn close_pool(pool: &PgPool, grace: Duration) -> Result<(), ShutdownError> {
    tracing::info!(grace_secs = grace.as_secs(), "closing database pool");
    tokio::time::timeout(grace, pool.close())
        .await
        .map_err(|_| ShutdownError::DrainTimeout(grace))?;
    tracing::info!("database pool closed");
    Ok(())
}
