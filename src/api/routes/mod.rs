pub mod ask;
pub mod health;
pub mod process;

use axum::http::{header, Method};
use axum::response::Html;
use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health::health_check))
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/process", post(process::process_urls))
        .route("/ask", post(ask::ask_question))
}

async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../../assets/index.html"))
}
