//! Response envelopes for the HTTP boundary.
//!
//! Every operation resolves to either a `(payload, message, status)` success
//! triple or a `(code, message, status, details)` failure — the request
//! layer renders these without inspecting internal state.

use intervia_core::error::InterviaError;
use serde::Serialize;

/// Successful operation envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSuccess<T> {
    pub data: T,
    pub message: String,
    pub status: u16,
}

impl<T: Serialize> ApiSuccess<T> {
    /// A 200 response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: 200,
        }
    }

    /// A 201 response for newly created entities.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            status: 201,
        }
    }
}

/// Failed operation envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    pub error: &'static str,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiFailure {
    /// Attaches optional structured details for the caller.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&InterviaError> for ApiFailure {
    fn from(err: &InterviaError) -> Self {
        Self {
            error: err.error_code(),
            message: err.to_string(),
            status: err.status_code(),
            details: None,
        }
    }
}

impl From<InterviaError> for ApiFailure {
    fn from(err: InterviaError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelopes() {
        let ok = ApiSuccess::ok(serde_json::json!({ "id": "s1" }), "session fetched");
        assert_eq!(ok.status, 200);

        let created = ApiSuccess::created(serde_json::json!({ "id": "s1" }), "session created");
        assert_eq!(created.status, 201);
    }

    #[test]
    fn test_failure_from_error() {
        let failure = ApiFailure::from(InterviaError::not_found("Session", "s1"));
        assert_eq!(failure.error, "not_found");
        assert_eq!(failure.status, 404);
        assert!(failure.message.contains("s1"));
        assert!(failure.details.is_none());
    }

    #[test]
    fn test_failure_serialization_skips_empty_details() {
        let failure = ApiFailure::from(InterviaError::invalid_input("bad payload"));
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["status"], 400);
        assert!(json.get("details").is_none());

        let with_details =
            ApiFailure::from(InterviaError::invalid_input("bad payload"))
                .with_details(serde_json::json!({ "field": "photoDataUrl" }));
        let json = serde_json::to_value(&with_details).unwrap();
        assert_eq!(json["details"]["field"], "photoDataUrl");
    }
}
