use std::sync::Arc;

use crate::extraction::text::TextExtractor;
use crate::llm_client::ModelInvoker;
use crate::pipeline::{ModelStage, RetryPolicy};
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub model: Arc<dyn ModelInvoker>,
    pub extractor: Arc<dyn TextExtractor>,
    pub retry: RetryPolicy,
    /// Request body cap for multipart uploads.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn stage(&self) -> ModelStage<'_> {
        ModelStage::new(self.model.as_ref(), &self.retry)
    }
}
