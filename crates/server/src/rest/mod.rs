pub mod assignment;
pub mod payment;
pub mod permissions;
pub mod region;
pub mod wash_area;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::access::middleware::{
    require_city_access, require_taluka_access, require_wash_area_access,
};
use crate::db::AppState;

/// Build the REST API router. Scope gates are attached per route with
/// `route_layer`, so they only run for matched requests.
pub fn api_router(state: &AppState) -> Router<AppState> {
    let city_gate = || from_fn_with_state(state.clone(), require_city_access);
    let taluka_gate = || from_fn_with_state(state.clone(), require_taluka_access);
    let wash_area_gate = || from_fn_with_state(state.clone(), require_wash_area_access);

    let regions = Router::new()
        .route("/api/regions", get(region::list_regions))
        .merge(
            Router::new()
                .route("/api/regions/talukas", get(region::list_talukas))
                .route_layer(city_gate()),
        );

    let wash_areas = Router::new()
        .merge(
            Router::new()
                .route("/api/wash-areas", get(wash_area::list_wash_areas))
                .route_layer(taluka_gate())
                .route_layer(city_gate()),
        )
        .merge(
            Router::new()
                .route("/api/wash-areas/details", get(wash_area::get_wash_area))
                .route_layer(wash_area_gate()),
        );

    let assignments = Router::new()
        .route(
            "/api/assignments/hr-talukas/validate",
            post(assignment::validate_hr_talukas),
        )
        .route("/api/assignments/hr-talukas", post(assignment::assign_hr_talukas))
        .merge(
            Router::new()
                .route(
                    "/api/assignments/washer-wash-area/validate",
                    post(assignment::validate_washer_wash_area),
                )
                .route(
                    "/api/assignments/washer-wash-area",
                    post(assignment::assign_washer_wash_area),
                )
                .route_layer(wash_area_gate()),
        );

    Router::new()
        .route("/api/me/permissions", get(permissions::my_permissions))
        .route("/api/payments/verify", post(payment::verify_payment))
        .merge(regions)
        .merge(wash_areas)
        .merge(assignments)
}
