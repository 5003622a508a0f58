use shared_types::{CityTalukaMap, DelegationCheck, GeographicScope, PlaceName};

/// A sub-admin may hand an HR profile only talukas that lie under one of the
/// sub-admin's assigned cities. Stops at the first taluka that does not.
pub fn validate_sub_admin_to_hr_assignment(
    sub_admin: &GeographicScope,
    proposed_talukas: &[PlaceName],
    regions: &CityTalukaMap,
) -> DelegationCheck {
    let outside = proposed_talukas.iter().find(|taluka| {
        !sub_admin
            .assigned_cities
            .iter()
            .any(|city| regions.city_has_taluka(city, taluka))
    });

    match outside {
        Some(taluka) => DelegationCheck::invalid(format!(
            "{taluka} does not belong to any of your assigned cities"
        )),
        None => DelegationCheck::valid(),
    }
}

/// An HR profile may hand a washer only a wash area inside one of its talukas.
pub fn validate_hr_to_washer_assignment(
    hr: &GeographicScope,
    wash_area_taluka: &PlaceName,
) -> DelegationCheck {
    if hr.assigned_talukas.contains(wash_area_taluka) {
        DelegationCheck::valid()
    } else {
        DelegationCheck::invalid(format!(
            "{wash_area_taluka} is not one of your assigned talukas"
        ))
    }
}

/// Admin delegation: every taluka must at least exist in the region table.
pub fn validate_known_talukas(
    proposed_talukas: &[PlaceName],
    regions: &CityTalukaMap,
) -> DelegationCheck {
    match proposed_talukas.iter().find(|t| !regions.contains_taluka(t)) {
        Some(taluka) => DelegationCheck::invalid(format!("{taluka} is not a known taluka")),
        None => DelegationCheck::valid(),
    }
}
