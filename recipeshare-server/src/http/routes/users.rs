//! User endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{JsonRow, UserRepo};
use crate::http::envelope::{created, non_empty, ok, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, IdPath};
use crate::http::server::AppState;
use crate::models::{parse_columns, UserColumn, UserName};

#[derive(Debug, Default, Deserialize)]
pub struct UserParams {
    /// Comma-separated field names
    pub columns: Option<String>,
}

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "UserName")]
    pub user_name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedUser {
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

/// GET /user/{id} - one user with rank
async fn get_user(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    ApiQuery(params): ApiQuery<UserParams>,
) -> Result<Json<Envelope<JsonRow>>, ApiError> {
    let columns = parse_columns(params.columns.as_deref(), UserColumn::DEFAULT)?;
    let user = UserRepo::new(&state.pool).get(id, &columns).await?;
    Ok(ok(user))
}

/// GET /users - all users with rank
async fn list_users(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<UserParams>,
) -> Result<Json<Envelope<Vec<JsonRow>>>, ApiError> {
    let columns = parse_columns(params.columns.as_deref(), UserColumn::DEFAULT)?;
    let users = UserRepo::new(&state.pool).list(&columns).await?;
    non_empty(users, "Users")
}

/// POST /user - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Envelope<CreatedUser>>), ApiError> {
    let name = UserName::new(&req.user_name)?;
    let user_id = UserRepo::new(&state.pool).create(name).await?;
    Ok(created(CreatedUser { user_id }))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user", post(create_user))
        .route("/user/{id}", get(get_user))
        .route("/users", get(list_users))
}
