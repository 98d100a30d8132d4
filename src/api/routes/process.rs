use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::application::ProcessReport;

#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    /// Newline-separated URLs, mirroring the sidebar textarea.
    pub urls: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub documents: usize,
    pub chunks: usize,
    pub skipped: Vec<SkippedUrlResponse>,
}

#[derive(Debug, Serialize)]
pub struct SkippedUrlResponse {
    pub url: String,
    pub reason: String,
}

impl From<ProcessReport> for ProcessResponse {
    fn from(report: ProcessReport) -> Self {
        Self {
            documents: report.documents,
            chunks: report.chunks,
            skipped: report
                .skipped
                .into_iter()
                .map(|s| SkippedUrlResponse {
                    url: s.url,
                    reason: s.reason,
                })
                .collect(),
        }
    }
}

pub async fn process_urls(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let urls: Vec<String> = request
        .urls
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let report = state.ingest_service.process(&urls).await.map_err(|e| {
        tracing::error!(error = %e, "Processing run failed");
        ApiError::from(e)
    })?;

    Ok(Json(ProcessResponse::from(report)))
}
