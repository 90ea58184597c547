//! JSON-directory TemplateRepository implementation.
//!
//! Same file-per-record layout as the session repository, under the
//! `templates/` directory.

use async_trait::async_trait;
use intervia_core::error::{InterviaError, Result};
use intervia_core::template::{CollegeJobTemplate, TemplateRepository};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::paths::InterviaPaths;

/// Filesystem-backed college job template repository.
pub struct JsonDirTemplateRepository {
    templates_dir: PathBuf,
}

impl JsonDirTemplateRepository {
    /// Creates a new repository rooted at `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory structure cannot be created.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let templates_dir = InterviaPaths::templates_dir(base_dir.as_ref());
        fs::create_dir_all(&templates_dir).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to create templates directory {:?}: {}",
                templates_dir, e
            ))
        })?;
        Ok(Self { templates_dir })
    }

    fn template_file_path(&self, template_id: &str) -> PathBuf {
        self.templates_dir.join(format!("{}.json", template_id))
    }
}

#[async_trait]
impl TemplateRepository for JsonDirTemplateRepository {
    async fn find_by_id(&self, template_id: &str) -> Result<Option<CollegeJobTemplate>> {
        let file_path = self.template_file_path(template_id);
        let json = match fs::read_to_string(&file_path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(InterviaError::store(format!(
                    "failed to read template file {:?}: {}",
                    file_path, e
                )));
            }
        };

        let template: CollegeJobTemplate = serde_json::from_str(&json)?;
        Ok(Some(template))
    }

    async fn save(&self, template: &CollegeJobTemplate) -> Result<()> {
        let file_path = self.template_file_path(&template.id);
        let json = serde_json::to_string_pretty(template)?;

        fs::write(&file_path, json).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to write template file {:?}: {}",
                file_path, e
            ))
        })?;

        Ok(())
    }

    async fn delete(&self, template_id: &str) -> Result<()> {
        let file_path = self.template_file_path(template_id);

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(InterviaError::store(format!(
                "failed to delete template file {:?}: {}",
                file_path, e
            ))),
        }
    }

    async fn list_for_college(&self, college_id: &str) -> Result<Vec<CollegeJobTemplate>> {
        let mut entries = fs::read_dir(&self.templates_dir).await.map_err(|e| {
            InterviaError::store(format!(
                "failed to read templates directory {:?}: {}",
                self.templates_dir, e
            ))
        })?;

        let mut templates = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            InterviaError::store(format!("failed to read directory entry: {}", e))
        })? {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let json = match fs::read_to_string(&path).await {
                Ok(json) => json,
                Err(e) => {
                    tracing::warn!("skipping unreadable template file {:?}: {}", path, e);
                    continue;
                }
            };
            match serde_json::from_str::<CollegeJobTemplate>(&json) {
                Ok(template) if template.college_id == college_id => templates.push(template),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("skipping malformed template file {:?}: {}", path, e);
                }
            }
        }

        templates.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        Ok(templates)
    }
}
