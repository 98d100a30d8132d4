use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheme_research::api::{create_router, AppState};
use scheme_research::application::{IngestService, QaService};
use scheme_research::infrastructure::{
    build_embedding, build_llm, Config, FileIndexStore, UrlLoader,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheme_research=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    let loader = Arc::new(UrlLoader::new()?);
    let embedding = build_embedding(&config.embedding)?;
    let llm = build_llm(&config.llm)?;
    let store = Arc::new(FileIndexStore::new(config.index.path.clone()));

    let ingest_service = Arc::new(IngestService::new(
        loader,
        embedding.clone(),
        store.clone(),
        config.chunking.window,
        config.chunking.overlap,
    ));
    let qa_service = Arc::new(QaService::new(embedding, llm, store, config.rag.top_k));

    let state = AppState::new(ingest_service, qa_service);
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Scheme research tool listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
