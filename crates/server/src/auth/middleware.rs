use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use super::jwt::validate_access_token;
use crate::config::Settings;

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Permissive auth middleware.
///
/// Validates the bearer token and, when it checks out, inserts its
/// [`Claims`](super::jwt::Claims) into the request extensions. Does NOT reject
/// unauthenticated requests; extractors and access gates decide that.
pub async fn auth_middleware(
    State(settings): State<Arc<Settings>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(req.headers()) {
        match validate_access_token(token, &settings.jwt_secret) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
            }
            Err(e) => {
                tracing::debug!(error = %e, "ignoring invalid bearer token");
            }
        }
    }

    next.run(req).await
}
