//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for managing session persistence.
///
/// This trait defines the contract for persisting and retrieving sessions,
/// decoupling the platform's core logic from the specific storage mechanism
/// (e.g., JSON files, database, remote API).
///
/// # Implementation Notes
///
/// Implementations are the durable source of truth: caching sits above this
/// trait and the application layer serializes concurrent writes per id, so
/// implementations only need plain last-write-wins `save` semantics.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<Session>>;

    /// Finds the session holding the given share token, if any.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: A session with this token exists
    /// - `Ok(None)`: No session holds this token
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_share_token(&self, token: &str) -> Result<Option<Session>>;

    /// Saves a session to storage, overwriting any prior record.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session from storage.
    ///
    /// Deleting a session that does not exist is not an error.
    async fn delete(&self, session_id: &str) -> Result<()>;

    /// Lists all stored sessions, most recently updated first.
    async fn list_all(&self) -> Result<Vec<Session>>;
}
