//! Application layer for Intervia.
//!
//! This crate wires the domain layer to the infrastructure layer: a session
//! store facade (durable repository + short-TTL cache + serialized updates +
//! audit trail) and the thin policy services the HTTP layer calls into.

pub mod api;
pub mod navigation;
pub mod presence;
pub mod session;
pub mod session_service;
pub mod share;
pub mod template_service;

pub use navigation::NavigationService;
pub use presence::PresenceService;
pub use session::{SessionCache, SessionStore, SessionUpdater};
pub use session_service::{CreateSessionRequest, SessionService};
pub use share::{ShareService, SharedReportView};
pub use template_service::{CreateTemplateRequest, TemplateService};
