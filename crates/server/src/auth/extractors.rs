use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use shared_types::{AppError, UserPermissions};

use super::jwt::Claims;
use crate::access::{lookup, AccessDenial};
use crate::db::AppState;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// The caller's resolved role and assignments.
///
/// Reuses the record an access gate already attached to the request;
/// otherwise looks the caller up. Fails closed with 403.
pub struct CallerPermissions(pub UserPermissions);

impl<S> FromRequestParts<S> for CallerPermissions
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AccessDenial;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(perms) = parts.extensions.get::<UserPermissions>() {
            return Ok(CallerPermissions(perms.clone()));
        }

        let state = AppState::from_ref(state);
        let claims = parts.extensions.get::<Claims>();
        let perms = lookup::resolve_caller(state.profiles.as_ref(), claims).await?;
        parts.extensions.insert(perms.clone());
        Ok(CallerPermissions(perms))
    }
}
