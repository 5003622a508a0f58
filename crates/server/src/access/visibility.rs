use shared_types::{AccessTier, CityTalukaMap, UserPermissions, WashArea};

use super::predicates::{has_access_to_city, has_access_to_taluka};

/// Whether `area` shows up in the caller's wash-area listings.
///
/// Unlike the wash-area predicate this respects geography: the caller needs
/// access to the area's city or its taluka, or (washers) a direct assignment.
pub fn can_view_wash_area(perms: &UserPermissions, area: &WashArea, regions: &CityTalukaMap) -> bool {
    let scope = &perms.scope;

    let via_city = area
        .city_name()
        .is_some_and(|city| has_access_to_city(perms.role, &scope.assigned_cities, &city));
    let via_taluka = || {
        area.taluka_name().is_some_and(|taluka| {
            has_access_to_taluka(
                perms.role,
                &scope.assigned_talukas,
                &scope.assigned_cities,
                &taluka,
                regions,
            )
        })
    };

    let via_assignment = || {
        perms.role.access_tier() == Some(AccessTier::Washer)
            && scope.assigned_wash_areas.contains(&area.id)
    };

    via_city || via_taluka() || via_assignment()
}
