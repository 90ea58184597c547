//! Append-only JSONL audit ledger.
//!
//! Entries are serialized to one JSON line each and appended to a single
//! file. Appends are serialized by a mutex so entries for the same entity
//! land in the order the mutations were applied. Entries are never updated
//! or deleted; `read_all` exists for forensic review and tests.

use async_trait::async_trait;
use intervia_core::audit::{AuditEntry, AuditLog};
use intervia_core::error::{InterviaError, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::paths::InterviaPaths;

/// File-backed append-only audit log.
pub struct JsonlAuditLog {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl JsonlAuditLog {
    /// Creates an audit log writing to `<base_dir>/audit.jsonl`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to create audit directory {:?}: {}",
                base_dir, e
            ))
        })?;
        Ok(Self {
            path: InterviaPaths::audit_log_path(base_dir),
            append_lock: Mutex::new(()),
        })
    }

    /// Reads the full ledger, oldest entry first.
    ///
    /// A missing file is an empty ledger. Malformed lines are skipped with a
    /// warning so one bad write cannot hide the rest of the trail.
    pub async fn read_all(&self) -> Result<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(InterviaError::store(format!(
                    "failed to read audit log {:?}: {}",
                    self.path, e
                )));
            }
        };

        let mut entries = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AuditEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!("skipping malformed audit line: {}", e);
                }
            }
        }
        Ok(entries)
    }

    /// Reads the ledger filtered to one entity, oldest entry first.
    pub async fn read_for_entity(&self, entity_id: &str) -> Result<Vec<AuditEntry>> {
        let entries = self.read_all().await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.entity_id == entity_id)
            .collect())
    }
}

#[async_trait]
impl AuditLog for JsonlAuditLog {
    async fn record(&self, entry: AuditEntry) -> Result<()> {
        let line = serde_json::to_string(&entry)?;

        let _guard = self.append_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                InterviaError::store(format!("failed to open audit log {:?}: {}", self.path, e))
            })?;
        file.write_all(line.as_bytes()).await.map_err(|e| {
            InterviaError::store(format!("failed to append audit entry: {}", e))
        })?;
        file.write_all(b"\n").await.map_err(|e| {
            InterviaError::store(format!("failed to append audit entry: {}", e))
        })?;
        file.flush()
            .await
            .map_err(|e| InterviaError::store(format!("failed to flush audit log: {}", e)))?;

        Ok(())
    }
}
