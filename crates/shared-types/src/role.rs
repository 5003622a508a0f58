use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Every role a profile can carry.
///
/// Two vocabularies exist in stored profiles: the operations hierarchy
/// (`admin`, `sub-admin`, `hr`, `washer`) and the business hierarchy
/// (`general`, `sub-general`, `hr-general`, `sales`, `customer`). Both parse
/// into this one type; [`UserRole::access_tier`] maps them onto the tiers the
/// geographic resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum UserRole {
    Admin,
    SubAdmin,
    Hr,
    Washer,
    General,
    SubGeneral,
    HrGeneral,
    Sales,
    #[default]
    Customer,
}

/// Geographic authority level used by the access predicates.
///
/// - `Admin`: every city, taluka and wash area.
/// - `SubAdmin`: assigned cities and every taluka under them.
/// - `Hr`: directly assigned talukas.
/// - `Washer`: directly assigned wash areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum AccessTier {
    Admin,
    SubAdmin,
    Hr,
    Washer,
}

/// Role → tier mapping. Roles absent from this table have no geographic authority.
const TIER_TABLE: &[(UserRole, AccessTier)] = &[
    (UserRole::Admin, AccessTier::Admin),
    (UserRole::General, AccessTier::Admin),
    (UserRole::SubAdmin, AccessTier::SubAdmin),
    (UserRole::SubGeneral, AccessTier::SubAdmin),
    (UserRole::Hr, AccessTier::Hr),
    (UserRole::HrGeneral, AccessTier::Hr),
    (UserRole::Washer, AccessTier::Washer),
];

impl UserRole {
    pub const ALL: [UserRole; 9] = [
        UserRole::Admin,
        UserRole::SubAdmin,
        UserRole::Hr,
        UserRole::Washer,
        UserRole::General,
        UserRole::SubGeneral,
        UserRole::HrGeneral,
        UserRole::Sales,
        UserRole::Customer,
    ];

    /// Parse a stored role string. Case and `_`/`-` separators are ignored;
    /// unknown values fall back to `Customer`, the least privileged role.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "admin" => UserRole::Admin,
            "sub-admin" | "subadmin" => UserRole::SubAdmin,
            "hr" => UserRole::Hr,
            "washer" => UserRole::Washer,
            "general" => UserRole::General,
            "sub-general" => UserRole::SubGeneral,
            "hr-general" => UserRole::HrGeneral,
            "sales" => UserRole::Sales,
            _ => UserRole::Customer,
        }
    }

    /// Lowercase hyphenated string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::SubAdmin => "sub-admin",
            UserRole::Hr => "hr",
            UserRole::Washer => "washer",
            UserRole::General => "general",
            UserRole::SubGeneral => "sub-general",
            UserRole::HrGeneral => "hr-general",
            UserRole::Sales => "sales",
            UserRole::Customer => "customer",
        }
    }

    pub fn access_tier(&self) -> Option<AccessTier> {
        TIER_TABLE
            .iter()
            .find(|(role, _)| role == self)
            .map(|(_, tier)| *tier)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(UserRole::from_str_or_default(&raw))
    }
}
