//! Question navigation over the session store.
//!
//! A thin policy layer: the clamping rules live on the domain model, this
//! service runs them through the store so every successful move is
//! serialized, cached, and audited.

use intervia_core::audit::AuditAction;
use intervia_core::error::Result;
use std::sync::Arc;

use crate::session::SessionStore;

/// Service for moving the question pointer.
pub struct NavigationService {
    store: Arc<SessionStore>,
}

impl NavigationService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Advances to the next question, saturating at the last one.
    ///
    /// Returns the new index.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown session
    /// - `NotStarted` before questions exist (nothing mutated, no audit entry)
    pub async fn advance(&self, session_id: &str) -> Result<usize> {
        let session = self
            .store
            .apply(
                session_id,
                AuditAction::QuestionAdvanced,
                |session| session.advance_question().map(|_| ()),
                |session| serde_json::json!({ "index": session.current_question_index }),
            )
            .await?;
        Ok(session.current_question_index)
    }

    /// Retreats to the previous question, saturating at the first one.
    ///
    /// Returns the new index.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown session
    /// - `NotStarted` before questions exist (nothing mutated, no audit entry)
    pub async fn retreat(&self, session_id: &str) -> Result<usize> {
        let session = self
            .store
            .apply(
                session_id,
                AuditAction::QuestionNavigatedBack,
                |session| session.retreat_question().map(|_| ()),
                |session| serde_json::json!({ "index": session.current_question_index }),
            )
            .await?;
        Ok(session.current_question_index)
    }
}
