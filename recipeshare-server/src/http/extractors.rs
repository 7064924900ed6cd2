//! Custom Axum extractors
//!
//! Wrap axum's extractors so every rejection is an `ApiError` and comes
//! back in the JSON error envelope.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;

use super::error::ApiError;
use crate::models::ValidationError;

/// Extract and validate a numeric id from the path
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "id" }))?;

        let id = raw.trim().parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "expected an integer id",
            })
        })?;

        Ok(Self(id))
    }
}

/// JSON body with an enveloped 400 on rejection
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Query string with an enveloped 400 on rejection
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest {
                message: e.body_text(),
            })?;
        Ok(Self(value))
    }
}

/// Parse a boolean query flag: `true/false`, `1/0`, `yes/no`; absent or
/// blank is false.
pub fn parse_flag(field: &'static str, raw: Option<&str>) -> Result<bool, ValidationError> {
    match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") | Some("no") => Ok(false),
        Some("true") | Some("1") | Some("yes") => Ok(true),
        Some(_) => Err(ValidationError::InvalidFormat {
            field,
            reason: "expected true or false",
        }),
    }
}

/// Parse an optional integer query parameter; absent or blank is `None`.
pub fn parse_optional_id(
    field: &'static str,
    raw: Option<&str>,
) -> Result<Option<i64>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "expected an integer id",
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        assert!(!parse_flag("img", None).unwrap());
        assert!(!parse_flag("img", Some("")).unwrap());
        assert!(parse_flag("img", Some("true")).unwrap());
        assert!(parse_flag("img", Some("1")).unwrap());
        assert!(parse_flag("img", Some("TRUE")).unwrap());
        assert!(!parse_flag("captionless", Some("0")).unwrap());
        assert!(parse_flag("captionless", Some("maybe")).is_err());
    }

    #[test]
    fn optional_ids() {
        assert_eq!(parse_optional_id("id", None).unwrap(), None);
        assert_eq!(parse_optional_id("id", Some("")).unwrap(), None);
        assert_eq!(parse_optional_id("id", Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_id("id", Some(" 42 ")).unwrap(), Some(42));
        assert!(matches!(
            parse_optional_id("id", Some("abc")).unwrap_err(),
            ValidationError::InvalidFormat { field: "id", .. }
        ));
    }
}
