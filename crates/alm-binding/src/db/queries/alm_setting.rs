//! ALM setting lookup queries.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::db::models::AlmSetting;
use crate::error::AppResult;

/// Get an ALM setting by its key.
pub async fn get_alm_setting_by_key(
    conn: &mut PgConnection,
    key: &str,
) -> AppResult<Option<AlmSetting>> {
    let setting = sqlx::query_as::<_, AlmSetting>(
        r#"
        SELECT id, key, alm, credentials
        FROM alm.alm_setting
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(conn)
    .await?;

    Ok(setting)
}

/// Get an ALM setting by its id.
pub async fn get_alm_setting_by_id(
    conn: &mut PgConnection,
    id: Uuid,
) -> AppResult<Option<AlmSetting>> {
    let setting = sqlx::query_as::<_, AlmSetting>(
        r#"
        SELECT id, key, alm, credentials
        FROM alm.alm_setting
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(setting)
}
