//! Location endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Location, LocationRepo};
use crate::http::envelope::{non_empty, Envelope};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /locations - all locations by city, then street
async fn list_locations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Envelope<Vec<Location>>>, ApiError> {
    let locations = LocationRepo::new(&state.pool).list().await?;
    non_empty(locations, "Locations")
}

/// Location routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/locations", get(list_locations))
}
