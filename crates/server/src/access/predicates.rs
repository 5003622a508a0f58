use shared_types::{AccessTier, CityTalukaMap, PlaceName, UserRole};
use uuid::Uuid;

/// Admins reach every city; sub-admins only their assigned ones.
pub fn has_access_to_city(role: UserRole, assigned_cities: &[PlaceName], target: &PlaceName) -> bool {
    match role.access_tier() {
        Some(AccessTier::Admin) => true,
        Some(AccessTier::SubAdmin) => assigned_cities.contains(target),
        _ => false,
    }
}

/// Sub-admins reach every taluka under any assigned city; HR staff reach
/// their directly assigned talukas.
pub fn has_access_to_taluka(
    role: UserRole,
    assigned_talukas: &[PlaceName],
    assigned_cities: &[PlaceName],
    target: &PlaceName,
    regions: &CityTalukaMap,
) -> bool {
    match role.access_tier() {
        Some(AccessTier::Admin) => true,
        Some(AccessTier::SubAdmin) => assigned_cities
            .iter()
            .any(|city| regions.city_has_taluka(city, target)),
        Some(AccessTier::Hr) => assigned_talukas.contains(target),
        Some(AccessTier::Washer) | None => false,
    }
}

/// Washers reach only their assigned wash areas.
///
/// Admin, sub-admin and HR tiers are granted any wash area without checking
/// that it lies inside their cities or talukas. Listing endpoints use
/// [`can_view_wash_area`](super::visibility::can_view_wash_area) for a
/// scope-aware check.
pub fn has_access_to_wash_area(role: UserRole, assigned_wash_areas: &[Uuid], target: &Uuid) -> bool {
    match role.access_tier() {
        Some(AccessTier::Admin | AccessTier::SubAdmin | AccessTier::Hr) => true,
        Some(AccessTier::Washer) => assigned_wash_areas.contains(target),
        None => false,
    }
}
