use axum::{extract::State, Json};
use std::collections::HashMap;
use uuid::Uuid;

use shared_types::{
    AccessTier, AppError, AssignHrTalukasRequest, AssignWasherWashAreaRequest, DelegationCheck,
    UserPermissions,
};

use crate::access::{
    has_access_to_taluka, validate_hr_to_washer_assignment, validate_known_talukas,
    validate_sub_admin_to_hr_assignment,
};
use crate::auth::extractors::CallerPermissions;
use crate::db::AppState;
use crate::error_convert::ValidateRequest;

// ---------------------------------------------------------------------------
// Delegation checks
// ---------------------------------------------------------------------------

fn hr_talukas_check(
    state: &AppState,
    caller: &UserPermissions,
    body: &AssignHrTalukasRequest,
) -> Result<DelegationCheck, AppError> {
    match caller.role.access_tier() {
        Some(AccessTier::Admin) => Ok(validate_known_talukas(&body.talukas, &state.regions)),
        Some(AccessTier::SubAdmin) => Ok(validate_sub_admin_to_hr_assignment(
            &caller.scope,
            &body.talukas,
            &state.regions,
        )),
        _ => Err(AppError::forbidden(
            "Only admins and sub-admins can assign talukas to HR",
        )),
    }
}

async fn washer_wash_area_check(
    state: &AppState,
    caller: &UserPermissions,
    body: &AssignWasherWashAreaRequest,
) -> Result<DelegationCheck, AppError> {
    let tier = caller.role.access_tier();
    if !matches!(
        tier,
        Some(AccessTier::Admin | AccessTier::SubAdmin | AccessTier::Hr)
    ) {
        return Err(AppError::forbidden(
            "Only admins, sub-admins and HR can assign wash areas to washers",
        ));
    }

    let area = state
        .wash_areas
        .find_wash_area(body.wash_area_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Wash area {} not found", body.wash_area_id)))?;
    let Some(taluka) = area.taluka_name() else {
        return Ok(DelegationCheck::invalid(format!(
            "Wash area {} has no taluka",
            area.id
        )));
    };

    let check = match tier {
        Some(AccessTier::Hr) => validate_hr_to_washer_assignment(&caller.scope, &taluka),
        Some(AccessTier::SubAdmin)
            if !has_access_to_taluka(
                caller.role,
                &caller.scope.assigned_talukas,
                &caller.scope.assigned_cities,
                &taluka,
                &state.regions,
            ) =>
        {
            DelegationCheck::invalid(format!(
                "{taluka} does not belong to any of your assigned cities"
            ))
        }
        _ => DelegationCheck::valid(),
    };
    Ok(check)
}

/// Turn a failed check into a 422 naming the offending field.
fn require_valid(check: DelegationCheck, field: &str) -> Result<(), AppError> {
    if check.valid {
        return Ok(());
    }
    let message = check
        .error
        .unwrap_or_else(|| "Invalid delegation".to_string());
    let mut field_errors = HashMap::new();
    field_errors.insert(field.to_string(), message.clone());
    Err(AppError::validation(message, field_errors))
}

/// Load the profile receiving an assignment and confirm its tier.
async fn delegate_profile(
    state: &AppState,
    id: Uuid,
    tier: AccessTier,
    label: &str,
) -> Result<UserPermissions, AppError> {
    let profile = state
        .profiles
        .fetch_permissions(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{label} profile {id} not found")))?;
    if profile.role.access_tier() != Some(tier) {
        return Err(AppError::bad_request(format!(
            "Profile {id} is not a {label} (role: {})",
            profile.role
        )));
    }
    Ok(profile)
}

// ---------------------------------------------------------------------------
// POST /api/assignments/hr-talukas/validate
// ---------------------------------------------------------------------------

/// Check whether the caller may hand these talukas to an HR profile.
#[utoipa::path(
    post,
    path = "/api/assignments/hr-talukas/validate",
    request_body = AssignHrTalukasRequest,
    responses(
        (status = 200, description = "Delegation decision", body = DelegationCheck),
        (status = 403, description = "Caller cannot delegate talukas", body = AppError),
        (status = 422, description = "Malformed request", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "assignments"
)]
pub async fn validate_hr_talukas(
    State(state): State<AppState>,
    CallerPermissions(caller): CallerPermissions,
    Json(body): Json<AssignHrTalukasRequest>,
) -> Result<Json<DelegationCheck>, AppError> {
    body.validate_request()?;
    Ok(Json(hr_talukas_check(&state, &caller, &body)?))
}

// ---------------------------------------------------------------------------
// POST /api/assignments/hr-talukas
// ---------------------------------------------------------------------------

/// Replace an HR profile's talukas after checking the delegation.
#[utoipa::path(
    post,
    path = "/api/assignments/hr-talukas",
    request_body = AssignHrTalukasRequest,
    responses(
        (status = 200, description = "Updated HR profile", body = UserPermissions),
        (status = 400, description = "Target is not an HR profile", body = AppError),
        (status = 403, description = "Caller cannot delegate talukas", body = AppError),
        (status = 404, description = "HR profile not found", body = AppError),
        (status = 422, description = "Taluka outside the caller's scope", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "assignments"
)]
pub async fn assign_hr_talukas(
    State(state): State<AppState>,
    CallerPermissions(caller): CallerPermissions,
    Json(body): Json<AssignHrTalukasRequest>,
) -> Result<Json<UserPermissions>, AppError> {
    body.validate_request()?;
    require_valid(hr_talukas_check(&state, &caller, &body)?, "talukas")?;
    delegate_profile(&state, body.hr_id, AccessTier::Hr, "HR").await?;

    let updated = state
        .profiles
        .set_assigned_talukas(body.hr_id, &body.talukas)
        .await?
        .ok_or_else(|| AppError::not_found(format!("HR profile {} not found", body.hr_id)))?;

    tracing::info!(
        assigned_by = %caller.user_id,
        hr_id = %body.hr_id,
        talukas = body.talukas.len(),
        "talukas assigned to HR"
    );
    Ok(Json(updated))
}

// ---------------------------------------------------------------------------
// POST /api/assignments/washer-wash-area/validate
// ---------------------------------------------------------------------------

/// Check whether the caller may hand this wash area to a washer.
#[utoipa::path(
    post,
    path = "/api/assignments/washer-wash-area/validate",
    request_body = AssignWasherWashAreaRequest,
    responses(
        (status = 200, description = "Delegation decision", body = DelegationCheck),
        (status = 403, description = "Caller cannot delegate wash areas", body = AppError),
        (status = 404, description = "Wash area not found", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "assignments"
)]
pub async fn validate_washer_wash_area(
    State(state): State<AppState>,
    CallerPermissions(caller): CallerPermissions,
    Json(body): Json<AssignWasherWashAreaRequest>,
) -> Result<Json<DelegationCheck>, AppError> {
    Ok(Json(washer_wash_area_check(&state, &caller, &body).await?))
}

// ---------------------------------------------------------------------------
// POST /api/assignments/washer-wash-area
// ---------------------------------------------------------------------------

/// Add a wash area to a washer after checking the delegation.
#[utoipa::path(
    post,
    path = "/api/assignments/washer-wash-area",
    request_body = AssignWasherWashAreaRequest,
    responses(
        (status = 200, description = "Updated washer profile", body = UserPermissions),
        (status = 400, description = "Target is not a washer", body = AppError),
        (status = 403, description = "Caller cannot delegate wash areas", body = AppError),
        (status = 404, description = "Washer or wash area not found", body = AppError),
        (status = 422, description = "Wash area outside the caller's talukas", body = AppError)
    ),
    security(("bearer" = [])),
    tag = "assignments"
)]
pub async fn assign_washer_wash_area(
    State(state): State<AppState>,
    CallerPermissions(caller): CallerPermissions,
    Json(body): Json<AssignWasherWashAreaRequest>,
) -> Result<Json<UserPermissions>, AppError> {
    require_valid(
        washer_wash_area_check(&state, &caller, &body).await?,
        "wash_area_id",
    )?;
    delegate_profile(&state, body.washer_id, AccessTier::Washer, "washer").await?;

    let updated = state
        .profiles
        .add_assigned_wash_area(body.washer_id, body.wash_area_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("washer profile {} not found", body.washer_id)))?;

    tracing::info!(
        assigned_by = %caller.user_id,
        washer_id = %body.washer_id,
        wash_area_id = %body.wash_area_id,
        "wash area assigned to washer"
    );
    Ok(Json(updated))
}
