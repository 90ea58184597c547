//! JSON-directory SessionRepository implementation.
//!
//! Each session is one pretty-printed JSON file named `<session_id>.json`
//! under the sessions directory. The filesystem is the source of truth;
//! caching and per-id write serialization live in the application layer.

use async_trait::async_trait;
use intervia_core::error::{InterviaError, Result};
use intervia_core::session::{Session, SessionRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::paths::InterviaPaths;

/// Filesystem-backed session repository.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── sessions/
///     ├── session-id-1.json
///     └── session-id-2.json
/// ```
pub struct JsonDirSessionRepository {
    sessions_dir: PathBuf,
}

impl JsonDirSessionRepository {
    /// Creates a new repository rooted at `base_dir`.
    ///
    /// The sessions directory is created if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let sessions_dir = InterviaPaths::sessions_dir(base_dir.as_ref());
        fs::create_dir_all(&sessions_dir).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to create sessions directory {:?}: {}",
                sessions_dir, e
            ))
        })?;
        Ok(Self { sessions_dir })
    }

    /// Creates a repository at the default location (`~/.intervia`).
    pub async fn default_location() -> Result<Self> {
        let base_dir = InterviaPaths::base_dir()
            .map_err(|e| InterviaError::store(format!("failed to resolve base directory: {}", e)))?;
        Self::new(base_dir).await
    }

    /// Returns the file path for a given session ID.
    fn session_file_path(&self, session_id: &str) -> PathBuf {
        self.sessions_dir.join(format!("{}.json", session_id))
    }

    /// Loads a session from a specific file path.
    async fn load_session_from_path(&self, path: &Path) -> Result<Session> {
        let json = fs::read_to_string(path).await.map_err(|e| {
            InterviaError::store(format!("failed to read session file {:?}: {}", path, e))
        })?;
        let session: Session = serde_json::from_str(&json)?;
        Ok(session)
    }
}

#[async_trait]
impl SessionRepository for JsonDirSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
        let file_path = self.session_file_path(session_id);
        let json = match fs::read_to_string(&file_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(InterviaError::store(format!(
                    "failed to read session file {:?}: {}",
                    file_path, e
                )));
            }
        };

        let session: Session = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    async fn find_by_share_token(&self, token: &str) -> Result<Option<Session>> {
        // Token lookups are rare compared to id lookups; a directory scan is
        // adequate at single-process scale.
        let sessions = self.list_all().await?;
        Ok(sessions
            .into_iter()
            .find(|s| s.share_token.as_deref() == Some(token)))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let file_path = self.session_file_path(&session.id);
        let json = serde_json::to_string_pretty(session)?;

        fs::write(&file_path, json).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to write session file {:?}: {}",
                file_path, e
            ))
        })?;

        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<()> {
        let file_path = self.session_file_path(session_id);

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InterviaError::store(format!(
                "failed to delete session file {:?}: {}",
                file_path, e
            ))),
        }
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let mut entries = fs::read_dir(&self.sessions_dir).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to read sessions directory {:?}: {}",
                self.sessions_dir, e
            ))
        })?;

        let mut sessions = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            InterviaError::store(format!("failed to read directory entry: {}", e))
        })? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match self.load_session_from_path(&path).await {
                Ok(session) => sessions.push(session),
                Err(e) => {
                    // An unreadable record must not hide the others.
                    tracing::warn!("skipping unreadable session file {:?}: {}", path, e);
                }
            }
        }

        // Sort by updated_at descending (most recent first)
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(sessions)
    }
}
