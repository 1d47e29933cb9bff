//! Project ALM binding queries.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::db::models::{NewProjectAlmBinding, ProjectAlmBinding};
use crate::error::AppResult;

/// Get the binding of a project.
pub async fn get_binding_by_project(
    conn: &mut PgConnection,
    project_id: Uuid,
) -> AppResult<Option<ProjectAlmBinding>> {
    let binding = sqlx::query_as::<_, ProjectAlmBinding>(
        r#"
        SELECT project_id, alm_setting_id, repository, slug, created_at, updated_at
        FROM alm.project_alm_binding
        WHERE project_id = $1
        "#,
    )
    .bind(project_id)
    .fetch_optional(conn)
    .await?;

    Ok(binding)
}

/// Insert a binding or replace every mutable column of the existing one.
///
/// A slug that is `None` overwrites any stored slug.
pub async fn upsert_binding(
    conn: &mut PgConnection,
    binding: &NewProjectAlmBinding,
) -> AppResult<ProjectAlmBinding> {
    let stored = sqlx::query_as::<_, ProjectAlmBinding>(
        r#"
        INSERT INTO alm.project_alm_binding (project_id, alm_setting_id, repository, slug)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (project_id) DO UPDATE
        SET alm_setting_id = EXCLUDED.alm_setting_id,
            repository = EXCLUDED.repository,
            slug = EXCLUDED.slug,
            updated_at = NOW()
        RETURNING project_id, alm_setting_id, repository, slug, created_at, updated_at
        "#,
    )
    .bind(binding.project_id)
    .bind(binding.alm_setting_id)
    .bind(&binding.repository)
    .bind(binding.slug.as_deref())
    .fetch_one(conn)
    .await?;

    Ok(stored)
}

/// Delete the binding of a project.
pub async fn delete_binding_by_project(conn: &mut PgConnection, project_id: Uuid) -> AppResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM alm.project_alm_binding
        WHERE project_id = $1
        "#,
    )
    .bind(project_id)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Count the projects bound to an ALM setting.
pub async fn count_bindings_by_alm_setting(
    conn: &mut PgConnection,
    alm_setting_id: Uuid,
) -> AppResult<i64> {
    let count: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM alm.project_alm_binding
        WHERE alm_setting_id = $1
        "#,
    )
    .bind(alm_setting_id)
    .fetch_one(conn)
    .await?;

    Ok(count)
}
