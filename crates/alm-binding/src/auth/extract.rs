use axum::{extract::FromRequestParts, http::request::Parts};

use super::Actor;
use crate::error::AppError;

/// Header carrying the authenticated login.
pub const ACTOR_HEADER: &str = "x-actor-login";

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let login = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|login| !login.is_empty());

        match login {
            Some(login) => Ok(Actor::new(login)),
            None => {
                tracing::warn!("Request without actor header");
                Err(AppError::Unauthorized)
            }
        }
    }
}
