//! Presence capture over the session store.
//!
//! Validates and normalizes one partial liveness submission, then hands the
//! merge to the domain policy: evidence accumulates monotonically so a
//! two-phase capture converges regardless of call order.

use intervia_core::audit::AuditAction;
use intervia_core::error::{InterviaError, Result};
use intervia_core::sanitize::{PlainTextSanitizer, Sanitizer};
use intervia_core::session::{
    PresenceUpdate, Session, PHOTO_DATA_URL_MAX_BYTES, PHRASE_TRANSCRIPT_MAX_CHARS,
};
use std::sync::Arc;

use crate::session::SessionStore;

/// Service for recording liveness evidence.
pub struct PresenceService {
    store: Arc<SessionStore>,
    sanitizer: Arc<dyn Sanitizer>,
}

impl PresenceService {
    /// Creates a presence service with the default plain-text sanitizer.
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self::with_sanitizer(store, Arc::new(PlainTextSanitizer))
    }

    /// Creates a presence service with an explicit sanitizer collaborator.
    pub fn with_sanitizer(store: Arc<SessionStore>, sanitizer: Arc<dyn Sanitizer>) -> Self {
        Self { store, sanitizer }
    }

    /// Merges one presence submission into the session.
    ///
    /// The transcript is truncated to its character cap and sanitized before
    /// storage. Supplied fields overwrite, omitted fields are preserved.
    ///
    /// # Errors
    ///
    /// - `NotFound` for an unknown session
    /// - `InvalidInput` for an empty submission or an oversized photo
    pub async fn record(&self, session_id: &str, update: PresenceUpdate) -> Result<Session> {
        if update.is_empty() {
            return Err(InterviaError::invalid_input(
                "presence update must include a photo or a phrase transcript",
            ));
        }
        if let Some(photo) = &update.photo_data_url {
            if photo.len() > PHOTO_DATA_URL_MAX_BYTES {
                return Err(InterviaError::invalid_input(
                    "photo exceeds the maximum encoded size",
                ));
            }
        }

        let update = PresenceUpdate {
            photo_data_url: update.photo_data_url,
            phrase_transcript: update.phrase_transcript.map(|transcript| {
                let truncated: String =
                    transcript.chars().take(PHRASE_TRANSCRIPT_MAX_CHARS).collect();
                self.sanitizer.sanitize(&truncated)
            }),
        };

        let now = chrono::Utc::now().to_rfc3339();
        self.store
            .apply(
                session_id,
                AuditAction::PresenceRecorded,
                move |session| {
                    session.merge_presence(update, &now);
                    Ok(())
                },
                |session| {
                    let evidence = session.presence.as_ref();
                    serde_json::json!({
                        "hasPhoto": evidence.is_some_and(|e| e.photo_data_url.is_some()),
                        "hasTranscript": evidence.is_some_and(|e| e.phrase_transcript.is_some()),
                    })
                },
            )
            .await
    }
}
