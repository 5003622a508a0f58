use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use shared_types::{AppError, CityQuery, CityRegion, CityTalukaMap, PlaceName};

fn city_region(city: &PlaceName, talukas: &[PlaceName]) -> CityRegion {
    CityRegion {
        city: city.clone(),
        talukas: talukas.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// GET /api/regions
// ---------------------------------------------------------------------------

/// Every configured city with its talukas, in name order.
#[utoipa::path(
    get,
    path = "/api/regions",
    responses(
        (status = 200, description = "City to taluka table", body = Vec<CityRegion>)
    ),
    tag = "regions"
)]
pub async fn list_regions(State(regions): State<Arc<CityTalukaMap>>) -> Json<Vec<CityRegion>> {
    Json(
        regions
            .iter()
            .map(|(city, talukas)| city_region(city, talukas))
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// GET /api/regions/talukas
// ---------------------------------------------------------------------------

/// Talukas of one city. Gated on the `city` parameter.
#[utoipa::path(
    get,
    path = "/api/regions/talukas",
    params(CityQuery),
    responses(
        (status = 200, description = "Talukas of the city", body = CityRegion),
        (status = 403, description = "City outside the caller's scope", body = AppError),
        (status = 404, description = "Unknown city", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "regions"
)]
pub async fn list_talukas(
    State(regions): State<Arc<CityTalukaMap>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<CityRegion>, AppError> {
    let talukas = regions
        .talukas_of(&query.city)
        .ok_or_else(|| AppError::not_found(format!("Unknown city: {}", query.city)))?;
    Ok(Json(city_region(&query.city, talukas)))
}
