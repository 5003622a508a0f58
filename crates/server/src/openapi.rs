use axum::Router;
use shared_types::{
    AccessTier, AppError, AppErrorKind, AssignHrTalukasRequest, AssignWasherWashAreaRequest,
    CityRegion, DelegationCheck, GeographicScope, PlaceName, UserPermissions, UserRole,
    VerifyPaymentRequest, VerifyPaymentResponse, WashArea,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health::{self, HealthResponse};
use crate::rest;

/// Registers the `bearer` scheme referenced by the gated endpoints.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        rest::permissions::my_permissions,
        rest::region::list_regions,
        rest::region::list_talukas,
        rest::wash_area::list_wash_areas,
        rest::wash_area::get_wash_area,
        rest::assignment::validate_hr_talukas,
        rest::assignment::assign_hr_talukas,
        rest::assignment::validate_washer_wash_area,
        rest::assignment::assign_washer_wash_area,
        rest::payment::verify_payment,
    ),
    components(schemas(
        AppError, AppErrorKind, HealthResponse,
        UserRole, AccessTier, PlaceName, GeographicScope, UserPermissions,
        CityRegion, WashArea, DelegationCheck,
        AssignHrTalukasRequest, AssignWasherWashAreaRequest,
        VerifyPaymentRequest, VerifyPaymentResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "permissions", description = "Caller role and geographic scope"),
        (name = "regions", description = "City and taluka table"),
        (name = "wash-areas", description = "Wash areas within the caller's scope"),
        (name = "assignments", description = "Delegating talukas and wash areas"),
        (name = "payments", description = "Razorpay checkout verification"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Wash Access API",
        description = "Geographic access control for the car-wash marketplace",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router that serves the API docs at `/docs`
/// and the REST API at `/api/*`.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(rest::api_router(&state))
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
}
