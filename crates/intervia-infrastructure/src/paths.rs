//! Unified path management for Intervia storage.
//!
//! All durable data lives under a single base directory:
//!
//! ```text
//! ~/.intervia/
//! ├── sessions/        # one JSON file per session
//! ├── templates/       # one JSON file per college job template
//! └── audit.jsonl      # append-only audit ledger
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for Intervia.
pub struct InterviaPaths;

impl InterviaPaths {
    /// Returns the default base directory (`~/.intervia`).
    pub fn base_dir() -> Result<PathBuf, PathError> {
        let home_dir = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home_dir.join(".intervia"))
    }

    /// Returns the sessions directory under `base_dir`.
    pub fn sessions_dir(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join("sessions")
    }

    /// Returns the templates directory under `base_dir`.
    pub fn templates_dir(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join("templates")
    }

    /// Returns the audit ledger path under `base_dir`.
    pub fn audit_log_path(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join("audit.jsonl")
    }
}
