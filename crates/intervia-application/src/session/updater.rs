//! Serialized read-modify-write over session records.
//!
//! `SessionUpdater` abstracts the "find → mutate → save" pattern used by
//! every mutating session operation, and serializes it per session id so two
//! racing calls can never lose each other's changes. Operations on different
//! ids never contend.

use intervia_core::error::{InterviaError, Result};
use intervia_core::session::{Session, SessionRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Helper for updating sessions with per-id mutual exclusion.
pub struct SessionUpdater {
    repository: Arc<dyn SessionRepository>,
    /// One mutex per session id, created on demand. Entries are tiny and
    /// retained for the process lifetime.
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionUpdater {
    /// Creates a new `SessionUpdater` over the given repository.
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the mutex guarding updates to `session_id`.
    pub(crate) async fn lock_for(&self, session_id: &str) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(session_id) {
                return lock.clone();
            }
        }
        let mut locks = self.locks.write().await;
        locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Runs the read-modify-write without taking the per-id lock.
    ///
    /// Callers must hold the lock returned by [`lock_for`] for `session_id`.
    pub(crate) async fn update_unlocked<F>(&self, session_id: &str, mutator: F) -> Result<Session>
    where
        F: FnOnce(&mut Session) -> Result<()>,
    {
        let mut session = self
            .repository
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| InterviaError::not_found("Session", session_id))?;

        mutator(&mut session)?;

        session.updated_at = chrono::Utc::now().to_rfc3339();
        self.repository.save(&session).await?;

        tracing::debug!(session_id = %session.id, "session updated");
        Ok(session)
    }

    /// Updates a session by applying the given mutator function.
    ///
    /// The mutator receives the full current snapshot; fields it does not
    /// touch are preserved verbatim. `updated_at` is refreshed on success and
    /// the updated snapshot is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session doesn't exist (`NotFound`; nothing is written)
    /// - The mutator function returns an error (nothing is written)
    /// - Saving to storage fails
    pub async fn update<F>(&self, session_id: &str, mutator: F) -> Result<Session>
    where
        F: FnOnce(&mut Session) -> Result<()>,
    {
        let lock = self.lock_for(session_id).await;
        let _guard = lock.lock().await;
        self.update_unlocked(session_id, mutator).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervia_core::session::SessionMode;
    use std::sync::Mutex as StdMutex;

    // Mock SessionRepository for testing
    struct MockSessionRepository {
        sessions: StdMutex<HashMap<String, Session>>,
    }

    impl MockSessionRepository {
        fn new() -> Self {
            Self {
                sessions: StdMutex::new(HashMap::new()),
            }
        }

        fn with_session(session: Session) -> Self {
            let repo = Self::new();
            repo.sessions
                .lock()
                .unwrap()
                .insert(session.id.clone(), session);
            repo
        }
    }

    #[async_trait::async_trait]
    impl SessionRepository for MockSessionRepository {
        async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>> {
            let snapshot = self.sessions.lock().unwrap().get(session_id).cloned();
            // Widen the read-modify-write window so an unserialized race
            // would actually lose updates.
            tokio::task::yield_now().await;
            Ok(snapshot)
        }

        async fn find_by_share_token(&self, token: &str) -> Result<Option<Session>> {
            Ok(self
                .sessions
                .lock()
                .unwrap()
                .values()
                .find(|s| s.share_token.as_deref() == Some(token))
                .cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id.clone(), session.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<()> {
            self.sessions.lock().unwrap().remove(session_id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().values().cloned().collect())
        }
    }

    fn test_session() -> Session {
        Session::new(SessionMode::Individual, "Engineer", "Mid")
    }

    #[tokio::test]
    async fn test_update_applies_mutator_and_stamps() {
        let session = test_session();
        let id = session.id.clone();
        let created_updated_at = session.updated_at.clone();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let updater = SessionUpdater::new(repo.clone());

        let updated = updater
            .update(&id, |s| {
                s.role = "Staff Engineer".to_string();
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(updated.role, "Staff Engineer");
        assert!(updated.updated_at >= created_updated_at);
        // Untouched fields preserved
        assert_eq!(updated.level, "Mid");
    }

    #[tokio::test]
    async fn test_update_missing_session_is_not_found() {
        let repo = Arc::new(MockSessionRepository::new());
        let updater = SessionUpdater::new(repo);

        let err = updater
            .update("missing", |_| Ok(()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failed_mutator_writes_nothing() {
        let session = test_session();
        let id = session.id.clone();
        let repo = Arc::new(MockSessionRepository::with_session(session.clone()));
        let updater = SessionUpdater::new(repo.clone());

        let err = updater
            .update(&id, |s| {
                s.role = "should not persist".to_string();
                Err(InterviaError::invalid_input("rejected"))
            })
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.role, session.role);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_on_same_id_lose_nothing() {
        let session = test_session();
        let id = session.id.clone();
        let repo = Arc::new(MockSessionRepository::with_session(session));
        let updater = Arc::new(SessionUpdater::new(repo.clone()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let updater = updater.clone();
            let id = id.clone();
            handles.push(tokio::spawn(async move {
                updater
                    .update(&id, move |s| {
                        s.top_skills.push(format!("skill-{}", i));
                        Ok(())
                    })
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.top_skills.len(), 8);
        for i in 0..8 {
            assert!(stored.top_skills.contains(&format!("skill-{}", i)));
        }
    }
}
