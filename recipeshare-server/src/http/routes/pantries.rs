//! Pantry endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Pantry, PantryRepo};
use crate::http::envelope::{non_empty, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::IdPath;
use crate::http::server::AppState;

/// GET /pantry/{id} - pantries of a user
async fn user_pantries(
    State(state): State<Arc<AppState>>,
    IdPath(user_id): IdPath,
) -> Result<Json<Envelope<Vec<Pantry>>>, ApiError> {
    let pantries = PantryRepo::new(&state.pool).for_user(user_id).await?;
    non_empty(pantries, "Pantry")
}

/// Pantry routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/pantry/{id}", get(user_pantries))
}
