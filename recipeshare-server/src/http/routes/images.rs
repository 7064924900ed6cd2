//! Image endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::db::repos::{Image, ImageRepo};
use crate::http::envelope::{non_empty, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{parse_flag, ApiQuery, IdPath};
use crate::http::server::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    pub captionless: Option<String>,
}

/// GET /images/{id} - images of a recipe
async fn list_images(
    State(state): State<Arc<AppState>>,
    IdPath(recipe_id): IdPath,
    ApiQuery(params): ApiQuery<ImageParams>,
) -> Result<Json<Envelope<Vec<Image>>>, ApiError> {
    let captionless = parse_flag("captionless", params.captionless.as_deref())?;
    let images = ImageRepo::new(&state.pool)
        .list(recipe_id, captionless)
        .await?;
    non_empty(images, "Images")
}

/// Image routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/images/{id}", get(list_images))
}
