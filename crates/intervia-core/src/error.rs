//! Error types for the Intervia platform.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Intervia platform.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant maps to a
/// stable error code and an HTTP status so the request layer can render
/// failures without inspecting internal state.
#[derive(Error, Debug, Clone, Serialize)]
pub enum InterviaError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Navigation or answering attempted before questions were generated
    #[error("Interview not started for session '{id}': no questions available")]
    NotStarted { id: String },

    /// Unparseable, oversized, or otherwise illegal request input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing or invalid operator session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Operator authenticated but not allowed to touch the entity
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Durable store failure, surfaced immediately and never retried here
    #[error("Store failure: {0}")]
    Store(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InterviaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a NotStarted error
    pub fn not_started(session_id: impl Into<String>) -> Self {
        Self::NotStarted {
            id: session_id.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a NotStarted error
    pub fn is_not_started(&self) -> bool {
        matches!(self, Self::NotStarted { .. })
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a Store error
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    // ============================================================================
    // Boundary mapping
    // ============================================================================

    /// The HTTP status code the request layer should respond with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::NotStarted { .. } | Self::InvalidInput(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Io { .. } | Self::Store(_) | Self::Serialization { .. } | Self::Internal(_) => {
                500
            }
        }
    }

    /// A stable machine-readable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::NotStarted { .. } => "not_started",
            Self::InvalidInput(_) => "invalid_input",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::Io { .. } => "io_error",
            Self::Store(_) => "store_failure",
            Self::Serialization { .. } => "serialization_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for InterviaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for InterviaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (for infrastructure helpers)
impl From<anyhow::Error> for InterviaError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Conversion from String (for error messages)
impl From<String> for InterviaError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, InterviaError>`.
pub type Result<T> = std::result::Result<T, InterviaError>;
