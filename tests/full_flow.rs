use async_trait::async_trait;
use axum::http::header;
use axum::response::Html;
use axum::{routing::get, Router};
use std::sync::Arc;

use scheme_research::application::{IngestService, QaService};
use scheme_research::domain::ports::{DocumentLoader, LlmService};
use scheme_research::domain::DomainError;
use scheme_research::infrastructure::{FileIndexStore, HashedEmbedding, UrlLoader};

const PENSION_ARTICLE: &str = r#"
<html><body><article>
  <h1>Atal Pension Yojana</h1>
  <p>The Atal Pension Yojana guarantees a monthly pension of 5000 rupees
     after the age of sixty.</p>
  <p>Subscribers contribute through their savings bank account.</p>
</article></body></html>
"#;

const CROP_ARTICLE: &str = r#"
<html><body><article>
  <h1>Crop Insurance Scheme</h1>
  <p>The crop insurance scheme covers yield losses from drought and flood.</p>
</article></body></html>
"#;

/// Stub generator that echoes its prompt, so answers contain whatever
/// context was retrieved.
struct EchoLlm;

#[async_trait]
impl LlmService for EchoLlm {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(prompt.to_string())
    }
}

async fn spawn_fixture_server() -> String {
    let app = Router::new()
        .route("/pension", get(|| async { Html(PENSION_ARTICLE) }))
        .route("/crops", get(|| async { Html(CROP_ARTICLE) }))
        .route(
            "/report.pdf",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "application/pdf")],
                    include_bytes!("fixtures/sample.pdf").as_slice(),
                )
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

struct Harness {
    ingest: IngestService,
    qa: QaService,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileIndexStore::new(dir.path().join("index.json")));
    let embedding = Arc::new(HashedEmbedding::new(256));
    let loader = Arc::new(UrlLoader::new().unwrap());

    Harness {
        ingest: IngestService::new(loader, embedding.clone(), store.clone(), 1000, 100),
        qa: QaService::new(embedding, Arc::new(EchoLlm), store, 4),
        _dir: dir,
    }
}

#[tokio::test]
async fn pdf_url_yields_exactly_one_tagged_document() {
    let base = spawn_fixture_server().await;
    let url = format!("{base}/report.pdf");

    let loader = UrlLoader::new().unwrap();
    let docs = loader.load(&url).await.unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].source, url);
    assert!(docs[0].text.contains("Hello"));
}

#[tokio::test]
async fn html_url_yields_documents_tagged_with_the_url() {
    let base = spawn_fixture_server().await;
    let url = format!("{base}/pension");

    let loader = UrlLoader::new().unwrap();
    let docs = loader.load(&url).await.unwrap();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].source, url);
    assert!(docs[0].text.contains("monthly pension of 5000 rupees"));
}

#[tokio::test]
async fn asking_before_processing_reports_process_first() {
    let h = harness();
    let err = h.qa.ask("What does the scheme pay?").await.unwrap_err();
    assert!(matches!(err, DomainError::IndexNotBuilt));
    assert!(err.to_string().contains("process URLs first"));
}

#[tokio::test]
async fn process_then_ask_returns_the_fact_and_its_source() {
    let base = spawn_fixture_server().await;
    let url = format!("{base}/pension");
    let h = harness();

    let report = h.ingest.process(&[url.clone()]).await.unwrap();
    assert_eq!(report.documents, 1);
    assert!(report.chunks >= 1);
    assert!(report.skipped.is_empty());

    let answer = h
        .qa
        .ask("What monthly pension does the scheme guarantee?")
        .await
        .unwrap();
    assert!(answer.text.contains("5000"));
    assert_eq!(answer.sources, vec![url]);
}

#[tokio::test]
async fn reprocessing_overwrites_the_previous_index() {
    let base = spawn_fixture_server().await;
    let pension_url = format!("{base}/pension");
    let crops_url = format!("{base}/crops");
    let h = harness();

    h.ingest.process(&[pension_url]).await.unwrap();
    h.ingest.process(&[crops_url.clone()]).await.unwrap();

    // Even a question about the first run's content can only retrieve
    // chunks from the second run.
    let answer = h
        .qa
        .ask("What monthly pension does the scheme guarantee?")
        .await
        .unwrap();
    assert_eq!(answer.sources, vec![crops_url]);
    assert!(!answer.text.contains("5000"));
}

#[tokio::test]
async fn failing_urls_are_skipped_and_reported() {
    let base = spawn_fixture_server().await;
    let missing_url = format!("{base}/does-not-exist");
    let pension_url = format!("{base}/pension");
    let h = harness();

    let report = h
        .ingest
        .process(&[missing_url.clone(), pension_url])
        .await
        .unwrap();

    assert_eq!(report.documents, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].url, missing_url);
}

#[tokio::test]
async fn processing_with_no_working_urls_is_a_single_error() {
    let base = spawn_fixture_server().await;
    let h = harness();

    let err = h
        .ingest
        .process(&[format!("{base}/nothing-here")])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let err = h.ingest.process(&[]).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}
