//! Project ALM binding API handlers.
//!
//! Endpoint names follow the `alm_settings` web service of the platform.

use axum::{extract::State, http::StatusCode, Json};

use super::params::{BodyParams, QueryParams};
use crate::auth::Actor;
use crate::db::models::{
    BindingResponse, CountBindingQuery, CountBindingResponse, DeleteBindingRequest,
    GetBindingQuery, SetBindingRequest,
};
use crate::error::AppResult;
use crate::services::BindingService;

/// Bind a project to an ALM setting.
///
/// `POST /api/alm_settings/set_binding`
///
/// If the project was already bound, the binding is replaced. Requires the
/// administer permission on the project.
///
/// # Request Body
///
/// Form-encoded or JSON:
///
/// ```json
/// {
///   "almSetting": "GitHub Server - Dev Team",
///   "project": "my_project",
///   "repository": "org/repo",
///   "slug": "optional-slug"
/// }
/// ```
///
/// # Response
///
/// `204 No Content`
pub async fn set_binding(
    State(service): State<BindingService>,
    actor: Actor,
    BodyParams(request): BodyParams<SetBindingRequest>,
) -> AppResult<StatusCode> {
    service.set_binding(&actor, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a project's binding.
///
/// `POST /api/alm_settings/delete_binding`
///
/// # Request Body
///
/// Form-encoded or JSON:
///
/// ```json
/// {"project": "my_project"}
/// ```
///
/// # Response
///
/// `204 No Content`, also when the project had no binding.
pub async fn delete_binding(
    State(service): State<BindingService>,
    actor: Actor,
    BodyParams(request): BodyParams<DeleteBindingRequest>,
) -> AppResult<StatusCode> {
    service.remove_binding(&actor, &request.project).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Count the projects bound to an ALM setting.
///
/// `GET /api/alm_settings/count_binding?almSetting=...`
///
/// Requires system administration.
///
/// # Response
///
/// ```json
/// {"key": "GitHub Server - Dev Team", "projects": 3}
/// ```
pub async fn count_binding(
    State(service): State<BindingService>,
    actor: Actor,
    QueryParams(query): QueryParams<CountBindingQuery>,
) -> AppResult<Json<CountBindingResponse>> {
    let response = service.count_bindings(&actor, &query.alm_setting).await?;
    Ok(Json(response))
}

/// Read a project's binding.
///
/// `GET /api/alm_settings/get_binding?project=...`
///
/// # Response
///
/// ```json
/// {"key": "GitHub Server - Dev Team", "alm": "github", "repository": "org/repo"}
/// ```
pub async fn get_binding(
    State(service): State<BindingService>,
    actor: Actor,
    QueryParams(query): QueryParams<GetBindingQuery>,
) -> AppResult<Json<BindingResponse>> {
    let response = service.get_binding(&actor, &query.project).await?;
    Ok(Json(response))
}
