//! Step endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::repos::{Step, StepRepo};
use crate::http::envelope::{created, non_empty, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, IdPath};
use crate::http::server::AppState;
use crate::models::StepList;

/// Create steps request: instructions in order
#[derive(Debug, Deserialize)]
pub struct CreateStepsRequest {
    pub steps: Vec<String>,
}

/// GET /recipe/{id}/steps - steps in order
async fn list_steps(
    State(state): State<Arc<AppState>>,
    IdPath(recipe_id): IdPath,
) -> Result<Json<Envelope<Vec<Step>>>, ApiError> {
    let steps = StepRepo::new(&state.pool).list(recipe_id).await?;
    non_empty(steps, "Steps")
}

/// POST /steps/{id} - append steps to a recipe, all or nothing
async fn create_steps(
    State(state): State<Arc<AppState>>,
    IdPath(recipe_id): IdPath,
    ApiJson(req): ApiJson<CreateStepsRequest>,
) -> Result<(StatusCode, Json<Envelope<Vec<Step>>>), ApiError> {
    let steps = StepList::new(&req.steps)?;
    let inserted = StepRepo::new(&state.pool)
        .insert_all(recipe_id, &steps)
        .await?;
    Ok(created(inserted))
}

/// Step routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipe/{id}/steps", get(list_steps))
        .route("/steps/{id}", post(create_steps))
}
