use std::sync::Arc;

use crate::application::{IngestService, QaService};

#[derive(Clone)]
pub struct AppState {
    pub ingest_service: Arc<IngestService>,
    pub qa_service: Arc<QaService>,
}

impl AppState {
    pub fn new(ingest_service: Arc<IngestService>, qa_service: Arc<QaService>) -> Self {
        Self {
            ingest_service,
            qa_service,
        }
    }
}
