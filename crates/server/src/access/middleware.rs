use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use shared_types::{PlaceName, UserPermissions};
use uuid::Uuid;

use super::target::{self, TargetValue};
use super::{lookup, predicates, AccessDenial, Scope};
use crate::auth::jwt::Claims;
use crate::db::AppState;

/// Gate on the `city` field. Attach with
/// `axum::middleware::from_fn_with_state(state, require_city_access)`.
pub async fn require_city_access(State(state): State<AppState>, req: Request, next: Next) -> Response {
    gate(&state, Scope::City, req, next).await
}

/// Gate on the `taluka` field.
pub async fn require_taluka_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    gate(&state, Scope::Taluka, req, next).await
}

/// Gate on the `wash_area_id` field.
pub async fn require_wash_area_access(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    gate(&state, Scope::WashArea, req, next).await
}

async fn gate(state: &AppState, scope: Scope, req: Request, next: Next) -> Response {
    match check(state, scope, req).await {
        Ok(req) => next.run(req).await,
        Err(denial) => denial.into_response(),
    }
}

/// Requests without the target field pass through untouched. Otherwise the
/// caller is resolved and every occurrence of the field, in the body and the
/// query string, must satisfy the predicate for `scope`. On success the
/// resolved [`UserPermissions`] are attached to the request.
async fn check(state: &AppState, scope: Scope, req: Request) -> Result<Request, AccessDenial> {
    let (mut req, targets) =
        target::extract_targets(req, scope.field(), state.settings.max_body_bytes).await?;
    if targets.is_empty() {
        return Ok(req);
    }

    let perms =
        lookup::resolve_caller(state.profiles.as_ref(), req.extensions().get::<Claims>()).await?;

    for value in &targets {
        let allowed = match value {
            TargetValue::Text(raw) => is_allowed(state, scope, &perms, raw),
            TargetValue::Malformed(_) => false,
        };
        if !allowed {
            tracing::warn!(
                user_id = %perms.user_id,
                role = %perms.role,
                scope = scope.label(),
                target = %value.raw(),
                "geographic access denied"
            );
            return Err(scope.denied(value.raw()));
        }
    }

    tracing::debug!(
        user_id = %perms.user_id,
        scope = scope.label(),
        targets = targets.len(),
        "access granted"
    );
    req.extensions_mut().insert(perms);
    Ok(req)
}

/// Values that cannot be parsed (an empty place name, a malformed id) are denied.
fn is_allowed(state: &AppState, scope: Scope, perms: &UserPermissions, raw: &str) -> bool {
    let assigned = &perms.scope;
    match scope {
        Scope::City => PlaceName::parse(raw).is_some_and(|city| {
            predicates::has_access_to_city(perms.role, &assigned.assigned_cities, &city)
        }),
        Scope::Taluka => PlaceName::parse(raw).is_some_and(|taluka| {
            predicates::has_access_to_taluka(
                perms.role,
                &assigned.assigned_talukas,
                &assigned.assigned_cities,
                &taluka,
                &state.regions,
            )
        }),
        Scope::WashArea => Uuid::parse_str(raw).is_ok_and(|id| {
            predicates::has_access_to_wash_area(perms.role, &assigned.assigned_wash_areas, &id)
        }),
    }
}
