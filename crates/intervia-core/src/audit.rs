//! Audit trail types.
//!
//! Every mutating session operation appends exactly one entry describing
//! what happened. Entries are write-once, ordered by creation time, and are
//! never read back to reconstruct state — the session record is the sole
//! source of truth; the trail exists for forensic review.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The set of state-changing actions the platform records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SessionCreated,
    InterviewStarted,
    QuestionAdvanced,
    QuestionNavigatedBack,
    PresenceRecorded,
    ActivityRecorded,
    InterviewCompleted,
    ReportAttached,
    ReportViewed,
    TemplateCreated,
    TemplateDuplicated,
}

impl AuditAction {
    /// The stable snake_case name used on the wire and in the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionCreated => "session_created",
            Self::InterviewStarted => "interview_started",
            Self::QuestionAdvanced => "question_advanced",
            Self::QuestionNavigatedBack => "question_navigated_back",
            Self::PresenceRecorded => "presence_recorded",
            Self::ActivityRecorded => "activity_recorded",
            Self::InterviewCompleted => "interview_completed",
            Self::ReportAttached => "report_attached",
            Self::ReportViewed => "report_viewed",
            Self::TemplateCreated => "template_created",
            Self::TemplateDuplicated => "template_duplicated",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable record of one state-changing action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: String,
    /// Action-specific context (new index, via channel, etc.)
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Timestamp when the entry was created (ISO 8601 format)
    pub timestamp: String,
}

impl AuditEntry {
    /// Creates a new entry stamped with the current time.
    pub fn new(
        action: AuditAction,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        metadata: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            metadata,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// An append-only ledger of mutating actions.
///
/// Recording is observability, not a transactional participant: a failed
/// append must be reported separately by the caller and must never roll back
/// or block the mutation it documents.
#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Appends one entry to the ledger.
    async fn record(&self, entry: AuditEntry) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_are_snake_case() {
        assert_eq!(AuditAction::QuestionAdvanced.as_str(), "question_advanced");
        assert_eq!(
            AuditAction::QuestionNavigatedBack.as_str(),
            "question_navigated_back"
        );
        assert_eq!(AuditAction::ReportViewed.to_string(), "report_viewed");
    }

    #[test]
    fn test_action_serde_matches_as_str() {
        for action in [
            AuditAction::SessionCreated,
            AuditAction::InterviewStarted,
            AuditAction::QuestionAdvanced,
            AuditAction::PresenceRecorded,
            AuditAction::ReportViewed,
        ] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn test_entry_roundtrip() {
        let entry = AuditEntry::new(
            AuditAction::QuestionAdvanced,
            "session",
            "session-1",
            serde_json::json!({ "index": 2 }),
        );
        let json = serde_json::to_string(&entry).unwrap();
        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
        assert_eq!(back.metadata["index"], 2);
    }
}
