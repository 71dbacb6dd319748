use crate::error::Result;
use crate::store::ArtifactStore;
use crate::types::{validate_file_name, ArtifactArea, SessionId};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// One uploaded legacy source file.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestedSession {
    pub session_id: SessionId,
    /// Storage paths in upload order; duplicates repeat the same path.
    pub files: Vec<PathBuf>,
}

/// Creates sessions and stores their uploaded inputs.
#[derive(Debug, Clone)]
pub struct SessionAllocator {
    store: Arc<ArtifactStore>,
}

impl SessionAllocator {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self { store }
    }

    pub async fn ingest(&self, files: Vec<UploadedFile>) -> Result<IngestedSession> {
        // Reject the whole batch before anything touches the disk.
        for file in &files {
            validate_file_name(&file.file_name)?;
        }

        let session_id = SessionId::generate();
        self.store.ensure_dir(&session_id, &ArtifactArea::Input).await?;

        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            let path = self
                .store
                .write(&session_id, &ArtifactArea::Input, &file.file_name, &file.contents)
                .await?;
            paths.push(path);
        }

        info!(
            session_id = %session_id,
            files = paths.len(),
            "Ingested legacy code session"
        );
        Ok(IngestedSession {
            session_id,
            files: paths,
        })
    }
}
