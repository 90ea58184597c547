//! Session domain model.
//!
//! This module contains the core Session entity that represents one
//! candidate's interview instance in the platform's domain layer.

use super::presence::PresenceEvidence;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted length of an encoded presence photo, in bytes.
pub const PHOTO_DATA_URL_MAX_BYTES: usize = 1_500_000;

/// Maximum stored length of a spoken-phrase transcript, in characters.
pub const PHRASE_TRANSCRIPT_MAX_CHARS: usize = 200;

/// The confirmation phrase candidates are asked to read aloud.
pub const DEFAULT_PHRASE_PROMPT: &str =
    "I confirm that I am completing this interview myself.";

/// The interview variant, which determines the setup flow and ownership model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Individual,
    Company,
    College,
}

/// Lifecycle state of a session.
///
/// Transitions are forward-only under normal operation: a session never
/// returns to `Draft` once the interview has started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Draft,
    InProgress,
    Completed,
}

impl SessionStatus {
    /// Whether the interview has finished.
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// One interview question, as produced by the external question generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Skill the question probes, when the generator tags one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            skill: None,
            difficulty: None,
        }
    }
}

/// Represents one candidate's interview instance in the domain layer.
///
/// A session contains:
/// - Immutable setup context (mode, role, level, ownership metadata)
/// - The generated question list and the current question pointer
/// - Accumulated liveness evidence (`presence`)
/// - The eventual report, score summary, and share token
/// - Timestamps for creation, last update, and last candidate activity
///
/// This is the "pure" domain model that business logic operates on,
/// independent of any specific storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Interview variant, set at creation, immutable
    pub mode: SessionMode,
    /// Target role the candidate is interviewed for
    pub role: String,
    /// Seniority level descriptor
    pub level: String,
    /// Lifecycle state, forward-only
    pub status: SessionStatus,
    /// Generated question list; empty until the interview is started
    #[serde(default)]
    pub questions: Vec<Question>,
    /// Skills the external extractor surfaced from the candidate's profile
    #[serde(default)]
    pub top_skills: Vec<String>,
    /// Pointer into `questions`; meaningful only when `questions` is non-empty
    #[serde(default)]
    pub current_question_index: usize,
    /// Liveness evidence, accumulated field-by-field across calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence: Option<PresenceEvidence>,
    /// Opaque report payload from the external report generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<serde_json::Value>,
    /// Opaque score summary from the external report generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_summary: Option<serde_json::Value>,
    /// Capability token granting read-only report access; minted once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
    /// Timestamp of the last liveness ping (ISO 8601 format)
    pub last_activity_at: String,
    /// Owning college for college-mode sessions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
    /// Operator that created the session, when one did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    /// Timestamp when the session was created (ISO 8601 format)
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format)
    pub updated_at: String,
}

impl Session {
    /// Creates a new draft session with a fresh UUID and current timestamps.
    pub fn new(mode: SessionMode, role: impl Into<String>, level: impl Into<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            mode,
            role: role.into(),
            level: level.into(),
            status: SessionStatus::Draft,
            questions: Vec::new(),
            top_skills: Vec::new(),
            current_question_index: 0,
            presence: None,
            report: None,
            score_summary: None,
            share_token: None,
            last_activity_at: now.clone(),
            college_id: None,
            created_by: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether a report has been attached to this session.
    pub fn has_report(&self) -> bool {
        self.report.is_some()
    }
}
