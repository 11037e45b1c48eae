//! Caller identity
//!
//! Authentication happens upstream of this service: the gateway verifies the
//! caller's credentials and forwards the user id in `x-user-id`. The
//! `authenticate` middleware turns that header into an `AuthenticatedUser`
//! request extension, and handlers pull it back out as an extractor.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
}

impl AuthenticatedUser {
    fn from_parts(parts: &Parts) -> Option<Self> {
        let id = parts.headers.get(USER_ID_HEADER)?.to_str().ok()?.trim();
        if id.is_empty() {
            return None;
        }
        Some(AuthenticatedUser { id: id.to_string() })
    }
}

/// Reject requests without a user id, and attach the user to the rest
pub async fn authenticate(request: Request, next: Next) -> Result<Response, ApiError> {
    let (mut parts, body) = request.into_parts();

    let Some(user) = AuthenticatedUser::from_parts(&parts) else {
        tracing::info!("Rejected unauthenticated request to {}", parts.uri.path());
        return Err(ApiError::Unauthorized);
    };

    parts.extensions.insert(user);
    Ok(next.run(Request::from_parts(parts, body)).await)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/contacts");
        if let Some(value) = value {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_user_from_header() {
        let parts = parts_with_header(Some("  user-42 "));
        assert_eq!(
            AuthenticatedUser::from_parts(&parts),
            Some(AuthenticatedUser { id: "user-42".to_string() })
        );
    }

    #[test]
    fn test_missing_or_blank_header() {
        assert!(AuthenticatedUser::from_parts(&parts_with_header(None)).is_none());
        assert!(AuthenticatedUser::from_parts(&parts_with_header(Some("   "))).is_none());
    }

    #[tokio::test]
    async fn test_extractor_requires_extension() {
        let mut parts = parts_with_header(Some("user-42"));
        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));

        parts.extensions.insert(AuthenticatedUser { id: "user-42".to_string() });
        let user = AuthenticatedUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.id, "user-42");
    }
}
