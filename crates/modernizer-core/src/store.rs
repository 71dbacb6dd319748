use crate::error::{ModernizerError, Result};
use crate::types::{validate_file_name, ArtifactArea, SessionId, STAGING_PREFIX};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

const SESSIONS_DIR: &str = "sessions";

/// Session-scoped file store rooted at the configured output directory.
///
/// Layout: `<root>/sessions/<session_id>/<area>/<file>`. Writes land in a
/// sibling temporary file first and are renamed over the target, so a
/// concurrent reader sees either the old or the new content in full.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn session_root(&self, session: &SessionId) -> PathBuf {
        self.root.join(SESSIONS_DIR).join(session.as_str())
    }

    pub fn area_dir(&self, session: &SessionId, area: &ArtifactArea) -> PathBuf {
        self.session_root(session).join(area.relative_path())
    }

    /// Creates the area directory (and parents) if missing. Idempotent.
    pub async fn ensure_dir(&self, session: &SessionId, area: &ArtifactArea) -> Result<PathBuf> {
        let dir = self.area_dir(session, area);
        tokio::fs::create_dir_all(&dir).await?;
        debug!("Ensured artifact directory {:?}", dir);
        Ok(dir)
    }

    pub async fn write(
        &self,
        session: &SessionId,
        area: &ArtifactArea,
        file_name: &str,
        contents: impl AsRef<[u8]>,
    ) -> Result<PathBuf> {
        let file_name = validate_file_name(file_name)?;
        let dir = self.ensure_dir(session, area).await?;
        let target = dir.join(file_name);
        let staging = dir.join(format!("{}{}.tmp", STAGING_PREFIX, Uuid::new_v4().simple()));

        let committed = match tokio::fs::write(&staging, contents.as_ref()).await {
            Ok(()) => tokio::fs::rename(&staging, &target).await,
            Err(e) => Err(e),
        };
        if let Err(e) = committed {
            match tokio::fs::remove_file(&staging).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == std::io::ErrorKind::NotFound => {}
                Err(cleanup) => {
                    warn!("Failed to remove staging file {:?}: {}", staging, cleanup)
                }
            }
            return Err(e.into());
        }

        info!(
            session_id = %session,
            bytes = contents.as_ref().len(),
            "Wrote artifact {:?}",
            target
        );
        Ok(target)
    }

    pub async fn write_json<T: Serialize>(
        &self,
        session: &SessionId,
        area: &ArtifactArea,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write(session, area, file_name, bytes).await
    }

    pub async fn read(
        &self,
        session: &SessionId,
        area: &ArtifactArea,
        file_name: &str,
    ) -> Result<Vec<u8>> {
        let file_name = validate_file_name(file_name)?;
        let path = self.area_dir(session, area).join(file_name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ModernizerError::NotFound(
                format!("artifact {} in session {}", file_name, session),
            )),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn read_json<T: DeserializeOwned>(
        &self,
        session: &SessionId,
        area: &ArtifactArea,
        file_name: &str,
    ) -> Result<T> {
        let bytes = self.read(session, area, file_name).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn session_exists(&self, session: &SessionId) -> bool {
        tokio::fs::metadata(self.session_root(session))
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Every file in the session tree, relative to the session root,
    /// `/`-separated and sorted. In-flight staging files are skipped.
    pub async fn list_artifacts(&self, session: &SessionId) -> Result<Vec<String>> {
        let root = self.session_root(session);
        if !self.session_exists(session).await {
            return Err(ModernizerError::NotFound(format!("session {}", session)));
        }

        let mut artifacts = Vec::new();
        let mut pending = vec![root.clone()];
        while let Some(dir) = pending.pop() {
            let mut entries = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if entry.file_name().to_string_lossy().starts_with(STAGING_PREFIX) {
                    continue;
                } else if let Ok(relative) = path.strip_prefix(&root) {
                    let parts: Vec<_> = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect();
                    artifacts.push(parts.join("/"));
                }
            }
        }
        artifacts.sort();
        Ok(artifacts)
    }
}
