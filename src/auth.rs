use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::AppError;

/// Header carrying the opaque user identifier minted by the external
/// identity provider. The UI layer authenticates the session and forwards
/// the id; this core never sees credentials.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Caller identity for operations that require one
///
/// Extraction fails with `Unauthenticated` before the handler body runs,
/// so no store or upstream call happens for anonymous mutation attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Identity(v.to_string()))
            .ok_or(AppError::Unauthenticated)
    }
}
