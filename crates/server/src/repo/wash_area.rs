use shared_types::{AppError, WashArea, WashAreaFilter};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Find a wash area by id.
pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<WashArea>, AppError> {
    let row = sqlx::query_as::<_, WashArea>(
        r#"
        SELECT id, name, city, taluka, address, created_at
        FROM wash_areas
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(row)
}

/// List wash areas, optionally narrowed to one city and/or taluka.
/// Names compare on their case-folded key; `place_key` is defined in the
/// wash area migration.
pub async fn list(
    pool: &Pool<Postgres>,
    filter: &WashAreaFilter,
) -> Result<Vec<WashArea>, AppError> {
    let rows = sqlx::query_as::<_, WashArea>(
        r#"
        SELECT id, name, city, taluka, address, created_at
        FROM wash_areas
        WHERE ($1::text IS NULL OR place_key(city) = $1)
          AND ($2::text IS NULL OR place_key(taluka) = $2)
        ORDER BY city, taluka, name
        "#,
    )
    .bind(filter.city.as_ref().map(|c| c.key()))
    .bind(filter.taluka.as_ref().map(|t| t.key()))
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    Ok(rows)
}
