//! API error types with IntoResponse
//!
//! Errors become `{"error": <message>, "status": <code>}` with a status
//! chosen by kind. Database detail is logged, never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed JSON body, query string or path (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { message: String },

    /// Store rejected the write: foreign key, unique, ... (409)
    Conflict,

    /// Pool exhausted or database unreachable (503)
    Unavailable,

    /// Any other database failure (500, logged)
    Database(DbError),
}

impl ApiError {
    /// 404 with `"<what> not found"`.
    pub fn not_found(what: &str) -> Self {
        Self::NotFound {
            message: format!("{} not found", what),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(e) => e.to_string(),
            Self::BadRequest { message } | Self::NotFound { message } => message,
            Self::Conflict => "request conflicts with existing data".to_string(),
            Self::Unavailable => "database unavailable".to_string(),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_string()
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound {
                message: format!("{} '{}' not found", resource, id),
            },
            DbError::Constraint { message } => {
                tracing::warn!(%message, "constraint violation");
                Self::Conflict
            }
            DbError::Unavailable(e) => {
                tracing::error!(error = %e, "database unavailable");
                Self::Unavailable
            }
            other => Self::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "RecipeName" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "RecipeName cannot be empty");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::not_found("Recipe").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Recipe not found");
    }

    #[tokio::test]
    async fn db_not_found_is_404() {
        let err = ApiError::from(DbError::not_found("recipe", 7));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn constraint_is_409_without_detail() {
        let err = ApiError::from(DbError::Constraint {
            message: "insert violates foreign key constraint \"recipes_user_id_fkey\"".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert!(!body["error"].as_str().unwrap().contains("fkey"));
    }

    #[tokio::test]
    async fn unavailable_is_503() {
        let err = ApiError::from(DbError::Unavailable(sqlx::Error::PoolTimedOut));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn query_failure_is_generic_500() {
        let err = ApiError::from(DbError::Query(sqlx::Error::RowNotFound));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "an internal error occurred");
    }
}
