//! Extractors forming the validation boundary.
//!
//! Every rejection, whether malformed input or a violated field constraint, surfaces as
//! [`AppError::Validation`] so handlers only ever run on checked input.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;
use serde_json::json;
use shelf_store::{RecordId, Rules, Validate};

use crate::error::AppError;

fn malformed(field: &str, message: String) -> AppError {
    AppError::validation(
        vec![json!({ "field": field, "message": message })],
        "Request validation failed",
    )
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        malformed("body", rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        malformed("query", rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        malformed("path", rejection.body_text())
    }
}

/// JSON body deserialized and then checked with [`Validate`]
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(AppError::from_violations)?;
        Ok(Self(value))
    }
}

/// Query string deserialized and then checked with [`Validate`]
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value.validate().map_err(AppError::from_violations)?;
        Ok(Self(value))
    }
}

/// Path parameters deserialized and then checked with [`Validate`]
#[derive(Debug)]
pub struct ValidPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        value.validate().map_err(AppError::from_violations)?;
        Ok(Self(value))
    }
}

/// A single positive record id taken from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub RecordId);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<RecordId>::from_request_parts(parts, state)
            .await
            .map_err(|_| malformed("id", "must be an integer".to_string()))?;

        Rules::new()
            .positive("id", id)
            .finish()
            .map_err(AppError::from_violations)?;

        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use shelf_store::Violation;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize)]
    struct Level {
        level: i64,
    }

    impl Validate for Level {
        fn validate(&self) -> Result<(), Vec<Violation>> {
            Rules::new().int_range("level", self.level, 1, 5).finish()
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(|IdPath(id): IdPath| async move { id.to_string() }))
            .route(
                "/search",
                get(|ValidQuery(input): ValidQuery<Level>| async move { input.level.to_string() }),
            )
            .route(
                "/items",
                post(|ValidJson(input): ValidJson<Level>| async move { input.level.to_string() }),
            )
    }

    async fn status_of(request: HttpRequest<Body>) -> StatusCode {
        app().oneshot(request).await.unwrap().status()
    }

    fn get_req(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("POST")
            .uri("/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn id_path_accepts_positive_ids() {
        assert_eq!(status_of(get_req("/items/7")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn id_path_rejects_zero_negative_and_text() {
        for uri in ["/items/0", "/items/-3", "/items/abc"] {
            assert_eq!(
                status_of(get_req(uri)).await,
                StatusCode::UNPROCESSABLE_ENTITY,
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn query_is_range_checked() {
        assert_eq!(status_of(get_req("/search?level=3")).await, StatusCode::OK);
        assert_eq!(
            status_of(get_req("/search?level=9")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(get_req("/search")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn json_body_is_parsed_then_validated() {
        assert_eq!(status_of(post_json(r#"{"level":1}"#)).await, StatusCode::OK);
        assert_eq!(
            status_of(post_json(r#"{"level":0}"#)).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(post_json(r#"{"lvl":1}"#)).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(post_json("not json")).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
