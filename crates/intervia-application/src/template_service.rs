//! College job template operations.
//!
//! Templates are operator-owned: every operation requires an authenticated
//! operator, and operators only see and copy templates within their own
//! college.

use intervia_core::audit::{AuditAction, AuditEntry, AuditLog};
use intervia_core::error::{InterviaError, Result};
use intervia_core::operator::{require_operator, OperatorIdentity};
use intervia_core::template::{CollegeJobTemplate, TemplateRepository};
use serde::Deserialize;
use std::sync::Arc;

/// Payload for creating a new template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub title: String,
    pub description: String,
    pub role: String,
    pub level: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Service for college job template management.
pub struct TemplateService {
    repository: Arc<dyn TemplateRepository>,
    audit: Arc<dyn AuditLog>,
}

impl TemplateService {
    pub fn new(repository: Arc<dyn TemplateRepository>, audit: Arc<dyn AuditLog>) -> Self {
        Self { repository, audit }
    }

    /// Creates a template owned by the operator's college.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` without an operator identity.
    pub async fn create(
        &self,
        operator: Option<&OperatorIdentity>,
        request: CreateTemplateRequest,
    ) -> Result<CollegeJobTemplate> {
        let operator = require_operator(operator)?;

        let template = CollegeJobTemplate::new(
            &operator.college_id,
            &operator.user_email,
            request.title,
            request.description,
            request.role,
            request.level,
            request.skills,
        );
        self.repository.save(&template).await?;
        self.record_audit(AuditEntry::new(
            AuditAction::TemplateCreated,
            "template",
            &template.id,
            serde_json::json!({ "collegeId": template.college_id }),
        ))
        .await;
        Ok(template)
    }

    /// Lists the operator's college's templates, most recent first.
    pub async fn list(
        &self,
        operator: Option<&OperatorIdentity>,
    ) -> Result<Vec<CollegeJobTemplate>> {
        let operator = require_operator(operator)?;
        self.repository.list_for_college(&operator.college_id).await
    }

    /// Duplicates a template within the operator's college.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without an operator identity
    /// - `NotFound` for an unknown template
    /// - `Forbidden` when the template belongs to another college
    pub async fn duplicate(
        &self,
        operator: Option<&OperatorIdentity>,
        template_id: &str,
    ) -> Result<CollegeJobTemplate> {
        let operator = require_operator(operator)?;

        let template = self
            .repository
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| InterviaError::not_found("Template", template_id))?;
        operator.ensure_college(&template.college_id)?;

        let copy = template.duplicate_for(&operator.user_email);
        self.repository.save(&copy).await?;
        self.record_audit(AuditEntry::new(
            AuditAction::TemplateDuplicated,
            "template",
            &copy.id,
            serde_json::json!({ "sourceTemplateId": template_id }),
        ))
        .await;
        Ok(copy)
    }

    async fn record_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.record(entry).await {
            tracing::warn!("failed to record audit entry: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervia_core::audit::AuditAction;
    use intervia_core::operator::OperatorRole;
    use intervia_infrastructure::{JsonDirTemplateRepository, JsonlAuditLog};
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        audit: Arc<JsonlAuditLog>,
        service: TemplateService,
    }

    async fn fixture() -> Fixture {
        let temp_dir = TempDir::new().unwrap();
        let repository = Arc::new(
            JsonDirTemplateRepository::new(temp_dir.path())
                .await
                .unwrap(),
        );
        let audit = Arc::new(JsonlAuditLog::new(temp_dir.path()).await.unwrap());
        let service = TemplateService::new(repository, audit.clone());
        Fixture {
            _temp_dir: temp_dir,
            audit,
            service,
        }
    }

    fn operator(college_id: &str) -> OperatorIdentity {
        OperatorIdentity {
            college_id: college_id.to_string(),
            user_email: format!("ops@{}.test", college_id),
            role: OperatorRole::Coordinator,
        }
    }

    fn request() -> CreateTemplateRequest {
        CreateTemplateRequest {
            title: "Backend Intern".to_string(),
            description: "Rust services team".to_string(),
            role: "Backend Engineer".to_string(),
            level: "Intern".to_string(),
            skills: vec!["rust".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_requires_operator() {
        let fixture = fixture().await;

        let err = fixture.service.create(None, request()).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn test_create_and_list_within_college() {
        let fixture = fixture().await;
        let op = operator("college-1");

        let created = fixture.service.create(Some(&op), request()).await.unwrap();
        assert_eq!(created.college_id, "college-1");

        let listed = fixture.service.list(Some(&op)).await.unwrap();
        assert_eq!(listed.len(), 1);

        // Another college sees nothing
        let other = operator("college-2");
        assert!(fixture.service.list(Some(&other)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_copies_under_new_id() {
        let fixture = fixture().await;
        let op = operator("college-1");
        let created = fixture.service.create(Some(&op), request()).await.unwrap();

        let copy = fixture
            .service
            .duplicate(Some(&op), &created.id)
            .await
            .unwrap();

        assert_ne!(copy.id, created.id);
        assert_eq!(copy.title, created.title);
        assert_eq!(copy.college_id, "college-1");

        let entries = fixture.audit.read_for_entity(&copy.id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::TemplateDuplicated);
        assert_eq!(entries[0].metadata["sourceTemplateId"], created.id);
    }

    #[tokio::test]
    async fn test_duplicate_across_colleges_is_forbidden() {
        let fixture = fixture().await;
        let owner = operator("college-1");
        let created = fixture
            .service
            .create(Some(&owner), request())
            .await
            .unwrap();

        let intruder = operator("college-2");
        let err = fixture
            .service
            .duplicate(Some(&intruder), &created.id)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_duplicate_unknown_template_is_not_found() {
        let fixture = fixture().await;
        let op = operator("college-1");

        let err = fixture
            .service
            .duplicate(Some(&op), "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
