//! Recipe endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{JsonRow, RecipeRepo};
use crate::http::envelope::{created, non_empty, ok, Envelope};
use crate::http::error::ApiError;
use crate::http::extractors::{parse_flag, parse_optional_id, ApiJson, ApiQuery, IdPath};
use crate::http::server::AppState;
use crate::models::{NewRecipe, RecipeQuery, RecipeUpdate};

/// Query parameters of GET /recipes
#[derive(Debug, Default, Deserialize)]
pub struct RecipeListParams {
    /// Join images
    pub img: Option<String>,
    /// Only image rows without a caption
    pub captionless: Option<String>,
    /// Cuisine to match exactly
    pub filter: Option<String>,
    /// Recipe id; blank means no filter
    pub id: Option<String>,
    /// Comma-separated field names
    pub columns: Option<String>,
}

/// Create recipe request
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    #[serde(rename = "RecipeName")]
    pub recipe_name: String,
    #[serde(rename = "Cuisine")]
    pub cuisine: String,
    #[serde(rename = "CookingTime")]
    pub cooking_time: String,
    #[serde(rename = "UserID")]
    pub user_id: i64,
}

/// Update recipe request; omitted fields keep their value
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(rename = "RecipeName")]
    pub recipe_name: Option<String>,
    #[serde(rename = "Cuisine")]
    pub cuisine: Option<String>,
    #[serde(rename = "CookingTime")]
    pub cooking_time: Option<String>,
}

/// Result of a write on one recipe
#[derive(Debug, Serialize)]
pub struct RecipeWriteResponse {
    #[serde(rename = "RecipeID")]
    pub recipe_id: i64,
    #[serde(rename = "Updated", skip_serializing_if = "Option::is_none")]
    pub updated: Option<u64>,
    #[serde(rename = "Deleted", skip_serializing_if = "Option::is_none")]
    pub deleted: Option<u64>,
}

impl RecipeWriteResponse {
    fn created(recipe_id: i64) -> Self {
        Self {
            recipe_id,
            updated: None,
            deleted: None,
        }
    }
}

/// GET /recipes - list or search recipes
async fn list_recipes(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<RecipeListParams>,
) -> Result<Json<Envelope<Vec<JsonRow>>>, ApiError> {
    let query = RecipeQuery::from_params(
        params.columns.as_deref(),
        params.filter.as_deref(),
        parse_optional_id("id", params.id.as_deref())?,
        parse_flag("img", params.img.as_deref())?,
        parse_flag("captionless", params.captionless.as_deref())?,
    )?;

    let rows = RecipeRepo::new(&state.pool).list(&query).await?;
    non_empty(rows, "Recipe")
}

/// GET /recipe/{id} - one recipe with its creator's name
async fn get_recipe(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Envelope<Vec<JsonRow>>>, ApiError> {
    let rows = RecipeRepo::new(&state.pool).get(id).await?;
    non_empty(rows, "Recipe")
}

/// POST /recipe - create a recipe
async fn create_recipe(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<Envelope<RecipeWriteResponse>>), ApiError> {
    let recipe = NewRecipe::new(&req.recipe_name, &req.cuisine, &req.cooking_time, req.user_id)?;
    let id = RecipeRepo::new(&state.pool).create(recipe).await?;
    Ok(created(RecipeWriteResponse::created(id)))
}

/// PUT /recipe/{id} - update some fields of a recipe
async fn update_recipe(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    ApiJson(req): ApiJson<UpdateRecipeRequest>,
) -> Result<Json<Envelope<RecipeWriteResponse>>, ApiError> {
    let update = RecipeUpdate::new(
        req.recipe_name.as_deref(),
        req.cuisine.as_deref(),
        req.cooking_time.as_deref(),
    )?;

    let updated = RecipeRepo::new(&state.pool).update(id, update).await?;
    if updated == 0 {
        return Err(ApiError::not_found("Recipe"));
    }

    Ok(ok(RecipeWriteResponse {
        recipe_id: id,
        updated: Some(updated),
        deleted: None,
    }))
}

/// DELETE /recipe/{id} - delete a recipe and its steps, images and likes
async fn delete_recipe(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Envelope<RecipeWriteResponse>>, ApiError> {
    let deleted = RecipeRepo::new(&state.pool).delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Recipe"));
    }

    Ok(ok(RecipeWriteResponse {
        recipe_id: id,
        updated: None,
        deleted: Some(deleted),
    }))
}

/// Recipe routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipe", post(create_recipe))
        .route(
            "/recipe/{id}",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_uses_public_names() {
        let req: CreateRecipeRequest = serde_json::from_str(
            r#"{"RecipeName":"Pasta Verde","Cuisine":"Italian","CookingTime":"00:30:00","UserID":3}"#,
        )
        .unwrap();
        assert_eq!(req.recipe_name, "Pasta Verde");
        assert_eq!(req.user_id, 3);
    }

    #[test]
    fn created_response_has_only_id() {
        let json = serde_json::to_value(RecipeWriteResponse::created(12)).unwrap();
        assert_eq!(json, serde_json::json!({"RecipeID": 12}));
    }
}
