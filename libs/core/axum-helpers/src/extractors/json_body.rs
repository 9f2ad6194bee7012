//! JSON extractor whose rejection renders as an [`AppError`].

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but malformed bodies produce the standard
/// error envelope instead of axum's plain-text rejection.
///
/// ```ignore
/// async fn create(JsonBody(body): JsonBody<serde_json::Value>) -> Result<(), AppError> {
///     Ok(())
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use tower::ServiceExt;

    async fn echo(JsonBody(body): JsonBody<serde_json::Value>) -> axum::Json<serde_json::Value> {
        axum::Json(body)
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_envelope() {
        let app = Router::new().route("/", post(echo));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[derive(serde::Deserialize)]
    struct Named {
        #[allow(dead_code)]
        name: String,
    }

    async fn named(JsonBody(_): JsonBody<Named>) -> StatusCode {
        StatusCode::OK
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_bad_request() {
        let app = Router::new().route("/", post(named));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":123}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let app = Router::new().route("/", post(echo));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .body(Body::from(r#"{"a":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let app = Router::new().route("/", post(echo));
        let response = app
            .oneshot(
                HttpRequest::post("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"a":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
