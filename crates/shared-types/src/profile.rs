use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::region::{optional_place_name, PlaceName};
use crate::role::UserRole;

// ---------------------------------------------------------------------------
// Assignment records
// ---------------------------------------------------------------------------

/// The geographic scope assigned to a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeographicScope {
    #[serde(default)]
    pub assigned_cities: Vec<PlaceName>,
    #[serde(default)]
    pub assigned_talukas: Vec<PlaceName>,
    #[serde(default)]
    pub assigned_wash_areas: Vec<Uuid>,
}

/// A caller's resolved role and assignments.
///
/// Produced once per gated request and attached to the request extensions
/// so downstream handlers can read it without another lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserPermissions {
    pub user_id: Uuid,
    pub role: UserRole,
    #[serde(flatten)]
    pub scope: GeographicScope,
    /// Home city of the profile, if recorded.
    pub city: Option<PlaceName>,
    /// Home taluka of the profile, if recorded.
    pub taluko: Option<PlaceName>,
}

/// Outcome of a delegation validator: `{ "valid": true }` or
/// `{ "valid": false, "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DelegationCheck {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DelegationCheck {
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Wash areas
// ---------------------------------------------------------------------------

/// A serviceable wash area inside one taluka.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct WashArea {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub taluka: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WashArea {
    pub fn city_name(&self) -> Option<PlaceName> {
        PlaceName::parse(&self.city)
    }

    pub fn taluka_name(&self) -> Option<PlaceName> {
        PlaceName::parse(&self.taluka)
    }
}

/// Optional filters for listing wash areas.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct WashAreaFilter {
    #[serde(default, deserialize_with = "optional_place_name")]
    pub city: Option<PlaceName>,
    #[serde(default, deserialize_with = "optional_place_name")]
    pub taluka: Option<PlaceName>,
}

/// Query for a single wash area.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct WashAreaIdQuery {
    pub wash_area_id: Uuid,
}

// ---------------------------------------------------------------------------
// Regions
// ---------------------------------------------------------------------------

/// One city and the talukas under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CityRegion {
    pub city: PlaceName,
    pub talukas: Vec<PlaceName>,
}

#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CityQuery {
    pub city: PlaceName,
}

// ---------------------------------------------------------------------------
// Assignment requests
// ---------------------------------------------------------------------------

/// Delegate talukas from a sub-admin to an HR profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct AssignHrTalukasRequest {
    pub hr_id: Uuid,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "At least one taluka is required"))
    )]
    pub talukas: Vec<PlaceName>,
}

/// Delegate a wash area from an HR profile to a washer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignWasherWashAreaRequest {
    pub washer_id: Uuid,
    pub wash_area_id: Uuid,
}
