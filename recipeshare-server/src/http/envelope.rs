//! Success envelope: `{"data": ...}`

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::ApiError;

/// Success response body
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// 200 with `{"data": data}`
pub fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> {
    Json(Envelope { data })
}

/// 201 with `{"data": data}`
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, Json(Envelope { data }))
}

/// 200 for a non-empty result, 404 `"<what> not found"` otherwise.
pub fn non_empty<T: Serialize>(
    rows: Vec<T>,
    what: &'static str,
) -> Result<Json<Envelope<Vec<T>>>, ApiError> {
    if rows.is_empty() {
        return Err(ApiError::not_found(what));
    }
    Ok(ok(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn wraps_in_data() {
        let Json(body) = ok(vec![1, 2]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"data": [1, 2]})
        );
    }

    #[test]
    fn created_is_201() {
        let response = created(serde_json::json!({"RecipeID": 9})).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn empty_is_not_found() {
        let err = non_empty(Vec::<i32>::new(), "Recipe").unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert!(non_empty(vec![1], "Recipe").is_ok());
    }
}
