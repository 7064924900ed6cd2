//! Liked-recipe endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{LikeRepo, LikedRecipe, RecipeSummary};
use crate::http::envelope::{non_empty, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::IdPath;
use crate::http::server::AppState;

/// GET /recipes/liked - every like
async fn liked(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<LikedRecipe>>>, ApiError> {
    let rows = LikeRepo::new(&state.pool).liked().await?;
    non_empty(rows, "Liked recipes")
}

/// GET /recipes/liked/{id} - recipes one user liked
async fn liked_by_user(
    State(state): State<Arc<AppState>>,
    IdPath(user_id): IdPath,
) -> Result<Json<Envelope<Vec<LikedRecipe>>>, ApiError> {
    let rows = LikeRepo::new(&state.pool).liked_by_user(user_id).await?;
    non_empty(rows, "Liked recipes")
}

/// GET /recipes/liked-by-all - recipes every user liked
async fn liked_by_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<RecipeSummary>>>, ApiError> {
    let rows = LikeRepo::new(&state.pool).liked_by_all().await?;
    non_empty(rows, "Recipes liked by all users")
}

/// Like routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes/liked", get(liked))
        .route("/recipes/liked/{id}", get(liked_by_user))
        .route("/recipes/liked-by-all", get(liked_by_all))
}
