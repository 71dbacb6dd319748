use crate::error::Result;
use crate::store::ArtifactStore;
use crate::types::{ArtifactArea, SessionId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SUMMARY_FILE: &str = "summary.json";
pub const PLACEHOLDER_SUMMARY: &str =
    "High-level system overview and module documentation (placeholder).";
pub const STATUS_GENERATED: &str = "generated";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub session_id: SessionId,
    pub status: String,
    pub summary: String,
}

/// Writes the session's documentation summary to `docs/summary.json`.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    store: Arc<ArtifactStore>,
}

impl DocumentGenerator {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub async fn generate(&self, session_id: &SessionId) -> Result<DocumentSummary> {
        let document = DocumentSummary {
            session_id: session_id.clone(),
            status: STATUS_GENERATED.to_string(),
            summary: PLACEHOLDER_SUMMARY.to_string(),
        };
        self.store
            .write_json(session_id, &ArtifactArea::Docs, SUMMARY_FILE, &document)
            .await?;
        Ok(document)
    }
}
