use axum::{
    extract::{Query, State},
    Json,
};

use shared_types::{AppError, WashArea, WashAreaFilter, WashAreaIdQuery};

use crate::access::can_view_wash_area;
use crate::auth::extractors::CallerPermissions;
use crate::db::AppState;

// ---------------------------------------------------------------------------
// GET /api/wash-areas
// ---------------------------------------------------------------------------

/// Wash areas visible to the caller. `city` and `taluka` are gated.
#[utoipa::path(
    get,
    path = "/api/wash-areas",
    params(WashAreaFilter),
    responses(
        (status = 200, description = "Visible wash areas", body = Vec<WashArea>),
        (status = 403, description = "Filter outside the caller's scope", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "wash-areas"
)]
pub async fn list_wash_areas(
    State(state): State<AppState>,
    CallerPermissions(perms): CallerPermissions,
    Query(filter): Query<WashAreaFilter>,
) -> Result<Json<Vec<WashArea>>, AppError> {
    let areas = state.wash_areas.list_wash_areas(&filter).await?;
    let visible: Vec<WashArea> = areas
        .into_iter()
        .filter(|area| can_view_wash_area(&perms, area, &state.regions))
        .collect();
    Ok(Json(visible))
}

// ---------------------------------------------------------------------------
// GET /api/wash-areas/details
// ---------------------------------------------------------------------------

/// One wash area. Gated on `wash_area_id`.
#[utoipa::path(
    get,
    path = "/api/wash-areas/details",
    params(WashAreaIdQuery),
    responses(
        (status = 200, description = "Wash area", body = WashArea),
        (status = 403, description = "Wash area outside the caller's scope", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "wash-areas"
)]
pub async fn get_wash_area(
    State(state): State<AppState>,
    Query(query): Query<WashAreaIdQuery>,
) -> Result<Json<WashArea>, AppError> {
    let area = state
        .wash_areas
        .find_wash_area(query.wash_area_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Wash area {} not found", query.wash_area_id)))?;
    Ok(Json(area))
}
