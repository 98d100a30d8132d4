mod ingest;
mod qa;

pub use ingest::{IngestService, ProcessReport, SkippedUrl};
pub use qa::QaService;
