//! API integration tests
//!
//! The router-level tests drive the application in-process with
//! `tower::ServiceExt::oneshot`; the final test hits a running server and is
//! ignored by default.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstore_server::{api, config::AppConfig, store::MemStore, AppState};

fn app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig::default()),
        store: Arc::new(MemStore::new()),
    };
    api::router(state)
}

fn json_request(method: Method, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .expect("failed to build request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

#[tokio::test]
async fn end_to_end_create_get_delete() {
    let app = app();
    let book = json!({
        "id": "978-1",
        "name": "Go",
        "authors": ["A"],
        "press": "P"
    });

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from(book.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/book/978-1", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_json(response).await, book);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/book", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([book]));

    let response = app
        .clone()
        .oneshot(json_request(Method::DELETE, "/book/978-1", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/book/978-1", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn non_json_content_type_is_rejected_and_store_untouched() {
    let app = app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/book")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from(r#"{"id":"978-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/book", Body::empty()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn missing_content_type_is_a_bad_request() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/book")
                .body(Body::from(r#"{"id":"978-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from("{not json"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_without_id_is_a_bad_request() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from(json!({"name": "No Id"}).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let app = app();
    let book = json!({"id": "978-1", "name": "Go"});

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from(book.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from(book.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn update_merges_partial_body_and_ignores_body_id() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/book",
            Body::from(
                json!({"id": "978-1", "name": "Go", "authors": ["A"], "press": "P"}).to_string(),
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Body carries a different id; the path id wins.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/book/978-1",
            Body::from(json!({"id": "978-9", "press": "New Press"}).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(Method::GET, "/book/978-1", Body::empty()))
        .await
        .unwrap();
    assert_eq!(
        body_json(response).await,
        json!({"id": "978-1", "name": "Go", "authors": ["A"], "press": "New Press"})
    );
}

#[tokio::test]
async fn update_of_missing_book_is_not_found() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/book/978-9",
            Body::from(json!({"name": "Ghost"}).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_needs_no_content_type() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/book"].is_object());
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored (needs a running server)
async fn live_end_to_end() {
    let client = reqwest::Client::new();
    let base = "http://localhost:8080";
    let book = json!({"id": "978-live", "name": "Go", "authors": ["A"], "press": "P"});

    let response = client
        .post(format!("{}/book", base))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/book/978-live", base))
        .header(header::CONTENT_TYPE, "application/json")
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, book);

    let response = client
        .delete(format!("{}/book/978-live", base))
        .header(header::CONTENT_TYPE, "application/json")
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}
