//! Health check endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::verify_pool;
use crate::http::envelope::{ok, Envelope};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /test - the API process is up
async fn test() -> Json<Envelope<&'static str>> {
    ok("API is working")
}

/// GET /check-db-connection - a pooled connection answers `SELECT 1`
async fn check_db_connection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<&'static str>>, ApiError> {
    verify_pool(&state.pool).await?;
    Ok(ok("Database connection successful"))
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/test", get(test))
        .route("/check-db-connection", get(check_db_connection))
}
