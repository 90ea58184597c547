pub mod json_dir_session_repository;
pub mod json_dir_template_repository;
pub mod jsonl_audit_log;
pub mod paths;

pub use crate::json_dir_session_repository::JsonDirSessionRepository;
pub use crate::json_dir_template_repository::JsonDirTemplateRepository;
pub use crate::jsonl_audit_log::JsonlAuditLog;
