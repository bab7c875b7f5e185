// Responses produced by the router itself rather than a handler

use super::fixtures::add_member;
use super::test_utils::{TestServer, COOKIE_NAME};
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let server = TestServer::new();

    let (status, body) = server.send("GET", "/members/everyone", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "statusCode": 404, "error": "Not Found", "message": "Not Found" })
    );
}

#[tokio::test]
async fn test_wrong_method_is_json_method_not_allowed() {
    let server = TestServer::new();

    let (status, body) = server.send("DELETE", "/health", None, None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["statusCode"], 405);
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn test_oversized_body_is_json_payload_too_large() {
    let server = TestServer::new();
    let id = add_member(&server.store, "ankush").await;
    let token = server.token_for(&id);
    let oversized = "x".repeat(2 * 1024 * 1024);

    for declare_length in [true, false] {
        let mut builder = Request::builder()
            .method("PUT")
            .uri("/users/self/intro")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, format!("{COOKIE_NAME}={token}"));
        if declare_length {
            builder = builder.header(header::CONTENT_LENGTH, oversized.len());
        }
        let request = builder.body(Body::from(oversized.clone())).unwrap();

        let response = server.call(request).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 413, "declared length: {declare_length}");
    }
}
