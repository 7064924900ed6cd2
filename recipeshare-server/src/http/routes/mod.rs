//! Route handlers organized by resource

use std::sync::Arc;

use axum::Router;

use super::error::ApiError;
use super::server::AppState;

pub mod health;
pub mod images;
pub mod likes;
pub mod locations;
pub mod pantries;
pub mod recipes;
pub mod steps;
pub mod users;

/// Every `/api` route
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::router())
        .merge(recipes::router())
        .merge(steps::router())
        .merge(images::router())
        .merge(likes::router())
        .merge(users::router())
        .merge(pantries::router())
        .merge(locations::router())
}

/// Unknown routes get the JSON error envelope too
pub async fn fallback() -> ApiError {
    ApiError::not_found("Route")
}
