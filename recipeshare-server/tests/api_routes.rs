//! Router tests against an unreachable database
//!
//! These exercise routing, input validation and error mapping without a
//! live store: anything that gets as far as a query fails with 503.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use recipeshare_server::{build_router, create_pool, AppState, DatabaseConfig, PoolSettings};

fn app() -> Router {
    let database = DatabaseConfig {
        host: "127.0.0.1".into(),
        port: 1,
        ..DatabaseConfig::default()
    };
    let settings = PoolSettings {
        min_connections: 0,
        acquire_timeout: Duration::from_millis(500),
        ..PoolSettings::default()
    };
    let pool = create_pool(&database, &settings);
    build_router(AppState { pool }, false)
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(uri: &str, json: &str) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_owned()))
            .unwrap(),
    )
    .await
}

#[tokio::test]
async fn test_route_is_up() {
    let (status, body) = get("/api/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], "API is working");
}

#[tokio::test]
async fn db_check_reports_unavailable() {
    let (status, body) = get("/api/check-db-connection").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "database unavailable");
    assert_eq!(body["status"], 503);
}

#[tokio::test]
async fn list_without_store_is_503_not_404() {
    let (status, _) = get("/api/locations").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (status, _) = get("/api/recipes?id=999999").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_column_rejected_before_query() {
    let (status, body) = get("/api/recipes?columns=RecipeID,Password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown column: 'Password'");

    let (status, _) = get("/api/users?columns=UserName;DROP%20TABLE%20users").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_flag_is_400() {
    let (status, _) = get("/api/recipes?img=sometimes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let (status, body) = get("/api/recipe/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id: expected an integer id");

    let (status, body) = get("/api/recipes?id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id: expected an integer id");
}

#[tokio::test]
async fn blank_list_params_are_absent() {
    // Blank fields pass validation and reach the (unreachable) store
    let (status, body) = get("/api/recipes?img=&captionless=&filter=&id=&columns=").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{body}");

    let (status, body) = get("/api/recipes?filter=Italian&id=").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE, "{body}");
}

#[tokio::test]
async fn create_recipe_validates_body() {
    let (status, body) = post_json(
        "/api/recipe",
        r#"{"RecipeName":"Pasta Verde","Cuisine":"Italian","CookingTime":"half an hour","UserID":3}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "CookingTime: expected HH:MM:SS");

    let (status, body) = post_json("/api/recipe", r#"{"RecipeName":"Pasta"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_json_is_enveloped() {
    let (status, body) = post_json("/api/user", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn empty_steps_rejected() {
    let (status, body) = post_json("/api/steps/1", r#"{"steps":[]}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "steps cannot be empty");
}

#[tokio::test]
async fn update_needs_a_field() {
    let (status, _) = send(
        Request::builder()
            .method("PUT")
            .uri("/api/recipe/1")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_is_enveloped_404() {
    let (status, body) = get("/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");
}
