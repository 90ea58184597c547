//! Session store facade.
//!
//! `SessionStore` combines the durable repository, the short-TTL read cache,
//! the serialized updater, and the audit ledger behind one surface. Every
//! mutating path overwrites the cache entry with the new snapshot and
//! appends one audit entry; audit appends happen inside the per-id critical
//! section so the trail's order matches the order mutations were applied.

use intervia_core::audit::{AuditAction, AuditEntry, AuditLog};
use intervia_core::error::Result;
use intervia_core::session::{Session, SessionRepository};
use std::path::Path;
use std::sync::Arc;

use intervia_infrastructure::{JsonDirSessionRepository, JsonlAuditLog};

use super::cache::SessionCache;
use super::updater::SessionUpdater;

/// Facade over session persistence, caching, serialization, and auditing.
pub struct SessionStore {
    repository: Arc<dyn SessionRepository>,
    cache: SessionCache,
    updater: SessionUpdater,
    audit: Arc<dyn AuditLog>,
}

impl SessionStore {
    /// Creates a store with the default cache configuration.
    pub fn new(repository: Arc<dyn SessionRepository>, audit: Arc<dyn AuditLog>) -> Self {
        Self::with_cache(repository, audit, SessionCache::new())
    }

    /// Creates a store with an explicit cache.
    pub fn with_cache(
        repository: Arc<dyn SessionRepository>,
        audit: Arc<dyn AuditLog>,
        cache: SessionCache,
    ) -> Self {
        Self {
            repository: repository.clone(),
            cache,
            updater: SessionUpdater::new(repository),
            audit,
        }
    }

    /// Opens a file-backed store rooted at `base_dir`.
    pub async fn open_at(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let repository = Arc::new(JsonDirSessionRepository::new(base_dir).await?);
        let audit = Arc::new(JsonlAuditLog::new(base_dir).await?);
        Ok(Self::new(repository, audit))
    }

    /// Opens a file-backed store at the default location (`~/.intervia`).
    pub async fn default_location() -> Result<Self> {
        let repository = Arc::new(JsonDirSessionRepository::default_location().await?);
        let base_dir = intervia_infrastructure::paths::InterviaPaths::base_dir()
            .map_err(|e| intervia_core::InterviaError::store(e.to_string()))?;
        let audit = Arc::new(JsonlAuditLog::new(&base_dir).await?);
        Ok(Self::new(repository, audit))
    }

    /// Persists a new session, primes the cache, and audits the creation.
    pub async fn create(&self, session: Session) -> Result<Session> {
        self.repository.save(&session).await?;
        self.cache.insert(session.clone()).await;
        self.record_audit(AuditEntry::new(
            AuditAction::SessionCreated,
            "session",
            &session.id,
            serde_json::json!({ "mode": session.mode }),
        ))
        .await;
        Ok(session)
    }

    /// Read-through lookup: cache first, durable repository on a miss.
    pub async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        if let Some(session) = self.cache.get(session_id).await {
            return Ok(Some(session));
        }
        let loaded = self.repository.find_by_id(session_id).await?;
        if let Some(session) = &loaded {
            self.cache.insert(session.clone()).await;
        }
        Ok(loaded)
    }

    /// Applies a serialized mutation and audits it.
    ///
    /// The mutator runs under the per-id lock; on success the cache entry is
    /// overwritten with the new snapshot, `metadata` is evaluated against it,
    /// and one audit entry is appended — best-effort, never failing the
    /// mutation it documents. On any error nothing is written and no entry
    /// is appended.
    pub async fn apply<F, M>(
        &self,
        session_id: &str,
        action: AuditAction,
        mutator: F,
        metadata: M,
    ) -> Result<Session>
    where
        F: FnOnce(&mut Session) -> Result<()>,
        M: FnOnce(&Session) -> serde_json::Value,
    {
        let lock = self.updater.lock_for(session_id).await;
        let _guard = lock.lock().await;

        let updated = self.updater.update_unlocked(session_id, mutator).await?;
        self.cache.insert(updated.clone()).await;
        self.record_audit(AuditEntry::new(
            action,
            "session",
            session_id,
            metadata(&updated),
        ))
        .await;
        Ok(updated)
    }

    /// Resolves a share token to its session, bypassing the cache.
    pub async fn find_by_share_token(&self, token: &str) -> Result<Option<Session>> {
        self.repository.find_by_share_token(token).await
    }

    /// Lists all sessions from the durable repository.
    pub async fn list(&self) -> Result<Vec<Session>> {
        self.repository.list_all().await
    }

    /// Removes a session from cache and durable storage.
    pub async fn delete(&self, session_id: &str) -> Result<()> {
        self.cache.invalidate(session_id).await;
        self.repository.delete(session_id).await
    }

    /// Drops the cache entry for a session mutated outside the update path.
    pub async fn invalidate(&self, session_id: &str) {
        self.cache.invalidate(session_id).await;
    }

    /// Appends an audit entry, best-effort.
    ///
    /// A failed append is reported via the log and never escalated to the
    /// caller.
    pub async fn record_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!("failed to record audit entry: {}", e);
        }
    }
}
