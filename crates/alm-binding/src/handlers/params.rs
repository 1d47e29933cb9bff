//! Request parameter extractors.
//!
//! Both extractors deserialize into a request type, check its [`Validate`]
//! constraints, and reject with [`AppError::Validation`], so a missing or
//! malformed parameter gets the same 422 JSON body as any other boundary
//! violation.

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{header, request::Parts},
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::db::models::Validate;
use crate::error::AppError;

/// Body parameters, accepted as `application/x-www-form-urlencoded` or JSON.
#[derive(Debug, Clone)]
pub struct BodyParams<T>(pub T);

impl<T, S> FromRequest<S> for BodyParams<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_form(&req) {
            let Form(value) = Form::<T>::from_request(req, state).await?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state).await?;
            value
        };
        Ok(Self(value.validate()?))
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

/// Query string parameters.
#[derive(Debug, Clone)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value.validate()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{CountBindingQuery, SetBindingRequest};
    use axum::body::Body;

    fn body_request(content_type: &str, body: &str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = body_request(
            "application/x-www-form-urlencoded",
            "almSetting=gh-1&project=P1&repository=org%2Frepo&slug=",
        );
        let BodyParams(request) = BodyParams::<SetBindingRequest>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(request.repository, "org/repo");
        assert_eq!(request.slug, None);
    }

    #[tokio::test]
    async fn test_json_body_missing_field() {
        let req = body_request("application/json", r#"{"almSetting": "gh-1", "project": "P1"}"#);
        let err = BodyParams::<SetBindingRequest>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("repository"));
    }

    #[tokio::test]
    async fn test_missing_query_parameter() {
        let req = Request::builder()
            .uri("/count_binding")
            .body(Body::empty())
            .unwrap();
        let (mut parts, _) = req.into_parts();
        let err = QueryParams::<CountBindingQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("almSetting"));
    }
}
