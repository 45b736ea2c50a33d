//! Body validation and CORS behaviour shared by both endpoints

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use common::{StaticTokenProvider, create_app, post_json, post_raw, test_config, unreachable_url};

const ENDPOINTS: [&str; 2] = ["/search-issues", "/generate-response"];

fn app() -> axum::Router {
    let config = test_config(&unreachable_url(), &unreachable_url());
    create_app(&config, Arc::new(StaticTokenProvider("mock_token")))
}

#[tokio::test]
async fn test_missing_query_field() {
    for path in ENDPOINTS {
        let (status, body) = post_json(app(), path, json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", path);
        assert!(body["detail"].is_string());
    }
}

#[tokio::test]
async fn test_invalid_query_field_type() {
    for path in ENDPOINTS {
        let (status, _) = post_json(app(), path, json!({"query": 12345})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", path);
    }
}

#[tokio::test]
async fn test_malformed_json() {
    for path in ENDPOINTS {
        let (status, _) =
            post_raw(app(), path, Some("application/json"), "{\"query\":".to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", path);
    }
}

#[tokio::test]
async fn test_missing_content_type() {
    for path in ENDPOINTS {
        let (status, _) = post_raw(app(), path, None, json!({"query": "x"}).to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", path);
    }
}

#[tokio::test]
async fn test_get_not_allowed() {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/search-issues")
        .body(Body::empty())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight_allowed_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/search-issues")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
        .body(Body::empty())
        .unwrap();

    let resp = app().oneshot(req).await.unwrap();
    let headers = resp.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "POST"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "content-type,x-custom"
    );
}

#[tokio::test]
async fn test_cors_preflight_foreign_origin() {
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/generate-response")
        .header(header::ORIGIN, "http://evil.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let resp = app().oneshot(req).await.unwrap();
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
