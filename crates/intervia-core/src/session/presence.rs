//! Liveness evidence types and the merge policy.
//!
//! Presence capture is two-phase in practice (photo now, phrase later, or
//! the other way around), so evidence accumulates field-by-field: a supplied
//! field overwrites its prior value, an omitted field is preserved, and
//! `completed_at` latches on the first call that lands any evidence.

use super::model::{Session, DEFAULT_PHRASE_PROMPT};
use serde::{Deserialize, Serialize};

/// Liveness evidence collected during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEvidence {
    /// Candidate photo as an encoded data URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_data_url: Option<String>,
    /// The phrase the candidate was asked to read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase_prompt: Option<String>,
    /// Transcript of the spoken phrase, sanitized before storage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phrase_transcript: Option<String>,
    /// Timestamp of the first call that landed evidence (ISO 8601 format)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

/// A partial presence submission from one capture call.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUpdate {
    #[serde(default)]
    pub photo_data_url: Option<String>,
    #[serde(default)]
    pub phrase_transcript: Option<String>,
}

impl PresenceUpdate {
    /// Whether the submission carries no evidence at all.
    pub fn is_empty(&self) -> bool {
        self.photo_data_url.is_none() && self.phrase_transcript.is_none()
    }
}

impl Session {
    /// Merges a partial presence submission into the session.
    ///
    /// Supplied fields overwrite, omitted fields are preserved. The phrase
    /// prompt defaults on first write and `completed_at` is set to `now` the
    /// first time any evidence lands; neither is ever reset afterwards.
    pub fn merge_presence(&mut self, update: PresenceUpdate, now: &str) {
        let evidence = self.presence.get_or_insert_with(PresenceEvidence::default);

        if let Some(photo) = update.photo_data_url {
            evidence.photo_data_url = Some(photo);
        }
        if let Some(transcript) = update.phrase_transcript {
            evidence.phrase_transcript = Some(transcript);
        }
        if evidence.phrase_prompt.is_none() {
            evidence.phrase_prompt = Some(DEFAULT_PHRASE_PROMPT.to_string());
        }
        if evidence.completed_at.is_none()
            && (evidence.photo_data_url.is_some() || evidence.phrase_transcript.is_some())
        {
            evidence.completed_at = Some(now.to_string());
        }
    }
}
