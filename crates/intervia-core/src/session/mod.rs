//! Session domain module.
//!
//! This module contains all session-related domain models, policies, and
//! repository interfaces.
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`) and its enums
//! - `navigation`: Bounds-checked question pointer movement
//! - `presence`: Liveness evidence types and the monotonic merge policy
//! - `repository`: Repository trait for session persistence

mod model;
mod navigation;
mod presence;
mod repository;

// Re-export public API
pub use model::{
    Question, Session, SessionMode, SessionStatus, DEFAULT_PHRASE_PROMPT,
    PHOTO_DATA_URL_MAX_BYTES, PHRASE_TRANSCRIPT_MAX_CHARS,
};
pub use presence::{PresenceEvidence, PresenceUpdate};
pub use repository::SessionRepository;
