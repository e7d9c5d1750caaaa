// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request extractors whose rejections use the API error body.
//!
//! Axum's stock `Json` and `Path` reject with plain text (and 415/422 for
//! some body problems). These wrappers turn every rejection into a 400
//! `{"error": ...}` response.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/items/{id}",
            post(
                |ApiPath(id): ApiPath<u64>, ApiJson(payload): ApiJson<Payload>| async move {
                    format!("{id}:{}", payload.name)
                },
            ),
        )
    }

    async fn send(uri: &str, body: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn valid_request_passes_through() {
        let (status, body) = send("/items/3", r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "3:x");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request_json() {
        let (status, body) = send("/items/3", r#"{}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (status, _) = send("/items/3", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_path_is_bad_request() {
        let (status, body) = send("/items/abc", r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.starts_with(r#"{"error":"#));
    }
}
