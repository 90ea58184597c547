//! College job template domain model and repository.
//!
//! A template is a reusable job-description bundle owned by a college. It
//! has a lifecycle independent of sessions: operators create, list, and
//! duplicate templates; the interview flow itself never mutates them.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable job-description + configuration bundle owned by a college.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeJobTemplate {
    pub id: String,
    pub college_id: String,
    pub title: String,
    pub description: String,
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CollegeJobTemplate {
    /// Creates a fresh template owned by `college_id`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        college_id: impl Into<String>,
        created_by: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        role: impl Into<String>,
        level: impl Into<String>,
        skills: Vec<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            college_id: college_id.into(),
            title: title.into(),
            description: description.into(),
            role: role.into(),
            level: level.into(),
            skills,
            created_by: created_by.into(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Copies this template's content under a fresh id and timestamps,
    /// attributed to `duplicated_by`.
    pub fn duplicate_for(&self, duplicated_by: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            college_id: self.college_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            role: self.role.clone(),
            level: self.level.clone(),
            skills: self.skills.clone(),
            created_by: duplicated_by.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// An abstract repository for college job template persistence.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Finds a template by its ID.
    async fn find_by_id(&self, template_id: &str) -> Result<Option<CollegeJobTemplate>>;

    /// Saves a template to storage, overwriting any prior record.
    async fn save(&self, template: &CollegeJobTemplate) -> Result<()>;

    /// Deletes a template from storage.
    async fn delete(&self, template_id: &str) -> Result<()>;

    /// Lists all templates owned by a college, most recently updated first.
    async fn list_for_college(&self, college_id: &str) -> Result<Vec<CollegeJobTemplate>>;
}
