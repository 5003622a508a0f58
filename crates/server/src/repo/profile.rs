use shared_types::{
    parse_place_names, AppError, GeographicScope, PlaceName, UserPermissions, UserRole,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Raw `profiles` row as stored. Array columns may be NULL for profiles
/// that were never assigned anything.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    role: Option<String>,
    assigned_cities: Option<Vec<String>>,
    assigned_talukas: Option<Vec<String>>,
    assigned_wash_areas: Option<Vec<Uuid>>,
    city: Option<String>,
    taluko: Option<String>,
}

impl From<ProfileRow> for UserPermissions {
    fn from(row: ProfileRow) -> Self {
        UserPermissions {
            user_id: row.id,
            role: UserRole::from_str_or_default(row.role.as_deref().unwrap_or_default()),
            scope: GeographicScope {
                assigned_cities: parse_place_names(row.assigned_cities.unwrap_or_default()),
                assigned_talukas: parse_place_names(row.assigned_talukas.unwrap_or_default()),
                assigned_wash_areas: row.assigned_wash_areas.unwrap_or_default(),
            },
            city: row.city.as_deref().and_then(PlaceName::parse),
            taluko: row.taluko.as_deref().and_then(PlaceName::parse),
        }
    }
}

const PROFILE_COLUMNS: &str =
    "id, role, assigned_cities, assigned_talukas, assigned_wash_areas, city, taluko";

/// Load the role and assignments of one profile.
pub async fn find_permissions(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<UserPermissions>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row.map(UserPermissions::from))
}

/// Overwrite `assigned_talukas`. Returns the updated profile or None.
pub async fn set_assigned_talukas(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    talukas: &[PlaceName],
) -> Result<Option<UserPermissions>, AppError> {
    let names: Vec<String> = talukas.iter().map(|t| t.as_str().to_string()).collect();

    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        UPDATE profiles
        SET assigned_talukas = $2, updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(&names)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row.map(UserPermissions::from))
}

/// Append a wash area id unless the profile already holds it.
pub async fn add_assigned_wash_area(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    wash_area_id: Uuid,
) -> Result<Option<UserPermissions>, AppError> {
    let row = sqlx::query_as::<_, ProfileRow>(&format!(
        r#"
        UPDATE profiles
        SET assigned_wash_areas = CASE
                WHEN $2 = ANY(COALESCE(assigned_wash_areas, '{{}}'::uuid[]))
                    THEN assigned_wash_areas
                ELSE array_append(COALESCE(assigned_wash_areas, '{{}}'::uuid[]), $2)
            END,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {PROFILE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(wash_area_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row.map(UserPermissions::from))
}

pub async fn ping(pool: &Pool<Postgres>) -> Result<(), AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}
