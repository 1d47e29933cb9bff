//! Capability lookup queries.

use uuid::Uuid;

use crate::db::DbPool;
use crate::error::AppResult;

/// Role granting administrative rights on a project.
pub const PROJECT_ADMIN_ROLE: &str = "admin";

/// Check whether a user holds a role on a project.
pub async fn has_project_role(
    pool: &DbPool,
    login: &str,
    project_id: Uuid,
    role: &str,
) -> AppResult<bool> {
    let found: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM alm.project_permission
            WHERE login = $1 AND project_id = $2 AND role = $3
        )
        "#,
    )
    .bind(login)
    .bind(project_id)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(found)
}

/// Check whether a user is a system administrator.
pub async fn is_system_admin(pool: &DbPool, login: &str) -> AppResult<bool> {
    let admin: Option<bool> = sqlx::query_scalar(
        r#"
        SELECT system_admin
        FROM alm.user_account
        WHERE login = $1
        "#,
    )
    .bind(login)
    .fetch_optional(pool)
    .await?;

    Ok(admin.unwrap_or(false))
}
