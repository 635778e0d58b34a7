//! JSON files on disk, one per session.

use crate::Session;
use chrono::{DateTime, Utc};
use paperclip_error::{PaperclipResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Directory of `{id}.json` session files.
///
/// Writes go to a temporary file that is renamed into place.
#[derive(Debug, Clone)]
pub struct SessionStore {
    base_path: PathBuf,
}

impl SessionStore {
    /// Open the store, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> PaperclipResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %base_path.display(), "Opened session store");
        Ok(Self { base_path })
    }

    /// Directory holding the session files.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// File a session with `id` is stored in.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    /// Create a session named after `prefix` and write it immediately.
    #[tracing::instrument(skip(self))]
    pub async fn start(&self, prefix: &str, now: DateTime<Utc>) -> PaperclipResult<Session> {
        let session = Session::new(prefix, now);
        self.save(&session).await?;
        tracing::info!(id = %session.id(), name = %session.name(), "Started session");
        Ok(session)
    }

    /// Write `session` as pretty-printed JSON.
    #[tracing::instrument(skip(self, session), fields(id = %session.id(), messages = session.messages().len()))]
    pub async fn save(&self, session: &Session) -> PaperclipResult<()> {
        let path = self.path_for(session.id());
        let json = serde_json::to_string_pretty(session).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidDocument(format!(
                "{}: {}",
                session.id(),
                e
            )))
        })?;

        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, json).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Saved session");
        Ok(())
    }

    /// Read the session stored under `id`.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, id: &str) -> PaperclipResult<Session> {
        let path = self.path_for(id);
        let data = tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let session: Session = serde_json::from_str(&data).map_err(|e| {
            StorageError::new(StorageErrorKind::InvalidDocument(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        Ok(session)
    }
}
