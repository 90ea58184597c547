//! Share-link report access.
//!
//! The token is the capability: no operator authentication is required, and
//! resolution succeeds only once a report exists. An unknown token and a
//! known token on a report-less session are indistinguishable to the caller.

use intervia_core::audit::{AuditAction, AuditEntry};
use intervia_core::error::{InterviaError, Result};
use intervia_core::session::SessionMode;
use serde::Serialize;
use std::sync::Arc;

use crate::session::SessionStore;

/// The read-only view a share-link holder receives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedReportView {
    pub mode: SessionMode,
    pub role: String,
    pub level: String,
    pub report: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_summary: Option<serde_json::Value>,
    /// When the session last changed, as shown on the shared page
    pub updated_at: String,
}

/// Service resolving share tokens to report views.
pub struct ShareService {
    store: Arc<SessionStore>,
}

impl ShareService {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Resolves a share token to a read-only report view.
    ///
    /// Every successful resolution appends a `report_viewed` audit entry
    /// tagged with the share-link channel.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when no session holds the token or the session has
    /// no report yet — deliberately the same error either way.
    pub async fn resolve(&self, token: &str) -> Result<SharedReportView> {
        let session = self
            .store
            .find_by_share_token(token)
            .await?
            .filter(|session| session.has_report())
            .ok_or_else(|| InterviaError::not_found("Report", token))?;

        self.store
            .record_audit(AuditEntry::new(
                AuditAction::ReportViewed,
                "session",
                &session.id,
                serde_json::json!({ "via": "share_link" }),
            ))
            .await;

        Ok(SharedReportView {
            mode: session.mode,
            role: session.role,
            level: session.level,
            // has_report() guaranteed this is present
            report: session.report.unwrap_or_default(),
            score_summary: session.score_summary,
            updated_at: session.updated_at,
        })
    }
}
