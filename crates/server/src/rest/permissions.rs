use axum::Json;
use shared_types::{AppError, UserPermissions};

use crate::auth::extractors::CallerPermissions;

// ---------------------------------------------------------------------------
// GET /api/me/permissions
// ---------------------------------------------------------------------------

/// The caller's role and geographic assignments.
#[utoipa::path(
    get,
    path = "/api/me/permissions",
    responses(
        (status = 200, description = "Resolved permissions", body = UserPermissions),
        (status = 403, description = "Caller could not be resolved", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "permissions"
)]
pub async fn my_permissions(CallerPermissions(perms): CallerPermissions) -> Json<UserPermissions> {
    Json(perms)
}
