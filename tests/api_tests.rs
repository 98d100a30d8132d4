use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use scheme_research::api::{create_router, AppState};
use scheme_research::application::{IngestService, QaService};
use scheme_research::domain::ports::LlmService;
use scheme_research::domain::DomainError;
use scheme_research::infrastructure::{FileIndexStore, HashedEmbedding, UrlLoader};

struct EchoLlm;

#[async_trait]
impl LlmService for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }
}

fn test_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileIndexStore::new(dir.path().join("index.json")));
    let embedding = Arc::new(HashedEmbedding::new(256));
    let loader = Arc::new(UrlLoader::new().unwrap());

    let ingest = Arc::new(IngestService::new(
        loader,
        embedding.clone(),
        store.clone(),
        1000,
        100,
    ));
    let qa = Arc::new(QaService::new(embedding, Arc::new(EchoLlm), store, 4));

    (create_router(AppState::new(ingest, qa)), dir)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn error_body(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn asking_before_processing_is_404_with_error_body() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(post_json("/api/v1/ask", json!({ "question": "what?" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(error_body(response).await.contains("process URLs first"));
}

#[tokio::test]
async fn empty_url_input_is_422_with_error_body() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(post_json("/api/v1/process", json!({ "urls": "\n   \n" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!error_body(response).await.is_empty());
}

#[tokio::test]
async fn empty_question_is_422_with_error_body() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(post_json("/api/v1/ask", json!({ "question": "  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!error_body(response).await.is_empty());
}

#[tokio::test]
async fn health_endpoint_reports_version() {
    let (app, _dir) = test_router();

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
}
