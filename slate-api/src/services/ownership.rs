//! Ownership checks.
//!
//! Every mutating operation requires the acting user to be the entity's
//! owner. Failing the check is `Forbidden` (403), not `NotFound` (404):
//! the caller learns the resource exists but is not theirs to change.

use crate::error::{ApiError, ApiResult};
use slate_core::{Project, Task, UserId};

/// Require that `acting` owns the project.
pub fn ensure_project_owner(project: &Project, acting: UserId) -> ApiResult<()> {
    if project.owner != acting {
        return Err(ApiError::forbidden("You are not the owner of this project"));
    }
    Ok(())
}

/// Require that `acting` owns the task.
pub fn ensure_task_owner(task: &Task, acting: UserId) -> ApiResult<()> {
    if task.owner != acting {
        return Err(ApiError::forbidden("You are not the owner of this task"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use slate_core::{new_entity_id, SELF_ENGAGED};

    #[test]
    fn owner_passes_stranger_fails() {
        let owner = new_entity_id();
        let now = Utc::now();
        let project = Project {
            project_id: new_entity_id(),
            name: "Plan".to_string(),
            slug: "plan".to_string(),
            owner,
            client: SELF_ENGAGED.to_string(),
            tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        assert!(ensure_project_owner(&project, owner).is_ok());

        let err = ensure_project_owner(&project, new_entity_id()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}
