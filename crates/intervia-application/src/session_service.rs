//! Session lifecycle operations.
//!
//! `SessionService` owns the forward-only status transitions: draft
//! creation, interview start (questions arrive from the external generator),
//! completion, liveness pings, and report attachment with share-token
//! minting.

use intervia_core::audit::AuditAction;
use intervia_core::error::{InterviaError, Result};
use intervia_core::session::{Question, Session, SessionMode, SessionStatus};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::session::SessionStore;

/// Payload for creating a new draft session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub mode: SessionMode,
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub college_id: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Service for session lifecycle management.
pub struct SessionService {
    store: Arc<SessionStore>,
}

impl SessionService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Creates a new draft session.
    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<Session> {
        let mut session = Session::new(request.mode, request.role, request.level);
        session.college_id = request.college_id;
        session.created_by = request.created_by;
        self.store.create(session).await
    }

    /// Fetches a session, read-through cached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id.
    pub async fn get_session(&self, session_id: &str) -> Result<Session> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| InterviaError::not_found("Session", session_id))
    }

    /// Starts the interview with the generated question list.
    ///
    /// Legal from `Draft` (and from `InProgress`, for a regenerated question
    /// set); a completed session can never be reopened.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `questions` is empty or the session is completed
    /// - `NotFound` for an unknown id
    pub async fn start_interview(
        &self,
        session_id: &str,
        questions: Vec<Question>,
        top_skills: Vec<String>,
    ) -> Result<Session> {
        if questions.is_empty() {
            return Err(InterviaError::invalid_input(
                "at least one question is required to start an interview",
            ));
        }

        self.store
            .apply(
                session_id,
                AuditAction::InterviewStarted,
                move |session| {
                    if session.status.is_completed() {
                        return Err(InterviaError::invalid_input(
                            "a completed interview cannot be restarted",
                        ));
                    }
                    session.questions = questions;
                    session.top_skills = top_skills;
                    session.current_question_index = 0;
                    session.status = SessionStatus::InProgress;
                    Ok(())
                },
                |session| serde_json::json!({ "questionCount": session.questions.len() }),
            )
            .await
    }

    /// Marks the interview as completed. Idempotent on a completed session.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the interview was never started
    /// - `NotFound` for an unknown id
    pub async fn complete_interview(&self, session_id: &str) -> Result<Session> {
        self.store
            .apply(
                session_id,
                AuditAction::InterviewCompleted,
                |session| {
                    if session.status == SessionStatus::Draft {
                        return Err(InterviaError::invalid_input(
                            "an interview that was never started cannot be completed",
                        ));
                    }
                    session.status = SessionStatus::Completed;
                    Ok(())
                },
                |_| serde_json::json!({}),
            )
            .await
    }

    /// Records a liveness ping by bumping `last_activity_at`.
    pub async fn record_activity(&self, session_id: &str) -> Result<Session> {
        let now = chrono::Utc::now().to_rfc3339();
        self.store
            .apply(
                session_id,
                AuditAction::ActivityRecorded,
                move |session| {
                    session.last_activity_at = now;
                    Ok(())
                },
                |_| serde_json::json!({}),
            )
            .await
    }

    /// Attaches the generated report and score summary to a completed
    /// session, minting the share token on first attachment.
    ///
    /// Re-attachment (a regenerated report) overwrites the payloads but
    /// keeps the original token, so shared links stay stable.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` unless the session is completed
    /// - `NotFound` for an unknown id
    pub async fn attach_report(
        &self,
        session_id: &str,
        report: serde_json::Value,
        score_summary: serde_json::Value,
    ) -> Result<Session> {
        self.store
            .apply(
                session_id,
                AuditAction::ReportAttached,
                move |session| {
                    if !session.status.is_completed() {
                        return Err(InterviaError::invalid_input(
                            "a report can only be attached to a completed interview",
                        ));
                    }
                    session.report = Some(report);
                    session.score_summary = Some(score_summary);
                    if session.share_token.is_none() {
                        session.share_token = Some(mint_share_token());
                    }
                    Ok(())
                },
                |session| serde_json::json!({ "shareTokenMinted": session.share_token.is_some() }),
            )
            .await
    }
}

/// Mints an unguessable opaque share token.
fn mint_share_token() -> String {
    format!(
        "{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use tempfile::TempDir;

    async fn service() -> (TempDir, SessionService) {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(SessionStore::open_at(temp_dir.path()).await.unwrap());
        (temp_dir, SessionService::new(store))
    }

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("Question {}", i + 1)))
            .collect()
    }

    fn create_request() -> CreateSessionRequest {
        CreateSessionRequest {
            mode: SessionMode::Individual,
            role: "Backend Engineer".to_string(),
            level: "Senior".to_string(),
            college_id: None,
            created_by: None,
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (_guard, service) = service().await;

        let session = service.create_session(create_request()).await.unwrap();
        assert_eq!(session.status, SessionStatus::Draft);

        let started = service
            .start_interview(&session.id, questions(3), vec!["rust".to_string()])
            .await
            .unwrap();
        assert_eq!(started.status, SessionStatus::InProgress);
        assert_eq!(started.questions.len(), 3);
        assert_eq!(started.current_question_index, 0);

        let completed = service.complete_interview(&session.id).await.unwrap();
        assert_eq!(completed.status, SessionStatus::Completed);

        let reported = service
            .attach_report(
                &session.id,
                serde_json::json!({ "verdict": "hire" }),
                serde_json::json!({ "overall": 82 }),
            )
            .await
            .unwrap();
        assert!(reported.report.is_some());
        assert!(reported.share_token.is_some());
    }

    #[tokio::test]
    async fn test_start_requires_questions() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();

        let err = service
            .start_interview(&session.id, Vec::new(), Vec::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_completed_session_cannot_restart() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();
        service
            .start_interview(&session.id, questions(2), Vec::new())
            .await
            .unwrap();
        service.complete_interview(&session.id).await.unwrap();

        let err = service
            .start_interview(&session.id, questions(2), Vec::new())
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_complete_is_idempotent() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();
        service
            .start_interview(&session.id, questions(2), Vec::new())
            .await
            .unwrap();

        service.complete_interview(&session.id).await.unwrap();
        let again = service.complete_interview(&session.id).await.unwrap();
        assert_eq!(again.status, SessionStatus::Completed);
    }

    #[tokio::test]
    async fn test_complete_requires_started_interview() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();

        let err = service.complete_interview(&session.id).await.unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_share_token_is_stable_across_report_regeneration() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();
        service
            .start_interview(&session.id, questions(1), Vec::new())
            .await
            .unwrap();
        service.complete_interview(&session.id).await.unwrap();

        let first = service
            .attach_report(&session.id, serde_json::json!({ "v": 1 }), serde_json::json!({}))
            .await
            .unwrap();
        let second = service
            .attach_report(&session.id, serde_json::json!({ "v": 2 }), serde_json::json!({}))
            .await
            .unwrap();

        assert_eq!(first.share_token, second.share_token);
        assert_eq!(second.report.unwrap()["v"], 2);
    }

    #[tokio::test]
    async fn test_attach_report_requires_completion() {
        let (_guard, service) = service().await;
        let session = service.create_session(create_request()).await.unwrap();
        service
            .start_interview(&session.id, questions(1), Vec::new())
            .await
            .unwrap();

        let err = service
            .attach_report(&session.id, serde_json::json!({}), serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let (_guard, service) = service().await;

        assert!(service.get_session("missing").await.unwrap_err().is_not_found());
        assert!(service
            .record_activity("missing")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_minted_tokens_are_unique_and_opaque() {
        let a = mint_share_token();
        let b = mint_share_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
