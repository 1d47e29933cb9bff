//! Project lookup queries.

use sqlx::PgConnection;

use crate::db::models::Project;
use crate::error::AppResult;

/// Get a project by its key.
pub async fn get_project_by_key(conn: &mut PgConnection, key: &str) -> AppResult<Option<Project>> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, key, name
        FROM alm.project
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(conn)
    .await?;

    Ok(project)
}
