//! In-memory read cache for session records.
//!
//! Session state changes frequently, so the TTL is deliberately short: a
//! stale hit is worse than a miss. The cache is advisory only — the durable
//! repository is the source of truth and losing every entry costs nothing
//! but extra store reads.

use intervia_core::session::Session;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default time-to-live for a cache entry.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Entry count above which an insert triggers an inline sweep.
pub const DEFAULT_SWEEP_THRESHOLD: usize = 100;

struct CacheEntry {
    session: Session,
    inserted_at: Instant,
}

/// Short-TTL read cache keyed by session id.
pub struct SessionCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    sweep_threshold: usize,
}

impl SessionCache {
    /// Creates a cache with the default TTL and sweep threshold.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL, DEFAULT_SWEEP_THRESHOLD)
    }

    /// Creates a cache with an explicit TTL and sweep threshold.
    pub fn with_ttl(ttl: Duration, sweep_threshold: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            sweep_threshold,
        }
    }

    /// Returns the cached session if its entry is still within the TTL.
    ///
    /// An entry past its TTL is evicted and reported as a miss.
    pub async fn get(&self, session_id: &str) -> Option<Session> {
        {
            let entries = self.entries.read().await;
            match entries.get(session_id) {
                None => return None,
                Some(entry) if entry.inserted_at.elapsed() <= self.ttl => {
                    return Some(entry.session.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: evict under the write lock and miss.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(session_id) {
            if entry.inserted_at.elapsed() > self.ttl {
                entries.remove(session_id);
            }
        }
        None
    }

    /// Unconditionally overwrites the entry for this session.
    ///
    /// When the cache has grown past the sweep threshold, entries older than
    /// twice the TTL are removed to bound memory.
    pub async fn insert(&self, session: Session) {
        let mut entries = self.entries.write().await;
        entries.insert(
            session.id.clone(),
            CacheEntry {
                session,
                inserted_at: Instant::now(),
            },
        );

        if entries.len() > self.sweep_threshold {
            let horizon = self.ttl * 2;
            entries.retain(|_, entry| entry.inserted_at.elapsed() <= horizon);
        }
    }

    /// Removes the entry for this session, if present.
    ///
    /// Called by any path that mutates the underlying record outside the
    /// normal update path.
    pub async fn invalidate(&self, session_id: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(session_id);
    }

    /// Clears all cached sessions.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Number of entries currently held (expired or not).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}
