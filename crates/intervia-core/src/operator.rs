//! Operator identity and tenant checks.
//!
//! The authentication collaborator (out of scope here) resolves a request to
//! an `OperatorIdentity`. This module only enforces its two consequences:
//! template operations require an operator, and operators act solely within
//! their own college.

use crate::error::{InterviaError, Result};
use serde::{Deserialize, Serialize};

/// Role an operator holds within their college.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorRole {
    Admin,
    Coordinator,
}

/// The authenticated operator acting on a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorIdentity {
    pub college_id: String,
    pub user_email: String,
    pub role: OperatorRole,
}

impl OperatorIdentity {
    /// Fails with `Forbidden` unless the operator belongs to `college_id`.
    pub fn ensure_college(&self, college_id: &str) -> Result<()> {
        if self.college_id == college_id {
            Ok(())
        } else {
            Err(InterviaError::forbidden(
                "operator does not belong to the owning college",
            ))
        }
    }
}

/// Fails with `Unauthorized` when no operator session is present.
pub fn require_operator(operator: Option<&OperatorIdentity>) -> Result<&OperatorIdentity> {
    operator.ok_or_else(|| InterviaError::unauthorized("operator session required"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> OperatorIdentity {
        OperatorIdentity {
            college_id: "college-1".to_string(),
            user_email: "ops@college-1.test".to_string(),
            role: OperatorRole::Coordinator,
        }
    }

    #[test]
    fn test_require_operator() {
        let op = operator();
        assert!(require_operator(Some(&op)).is_ok());

        let err = require_operator(None).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_cross_tenant_access_is_forbidden() {
        let op = operator();
        assert!(op.ensure_college("college-1").is_ok());

        let err = op.ensure_college("college-2").unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
