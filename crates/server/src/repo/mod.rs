pub mod memory;
pub mod profile;
pub mod wash_area;

use async_trait::async_trait;
use shared_types::{AppError, PlaceName, UserPermissions, WashArea, WashAreaFilter};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub use memory::MemoryStore;

/// Read and update the assignment fields of profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load a profile's role and assignments. `Ok(None)` when no profile has this id.
    async fn fetch_permissions(&self, user_id: Uuid) -> Result<Option<UserPermissions>, AppError>;

    /// Replace a profile's assigned talukas.
    async fn set_assigned_talukas(
        &self,
        user_id: Uuid,
        talukas: &[PlaceName],
    ) -> Result<Option<UserPermissions>, AppError>;

    /// Append a wash area to a profile's assignments. Already-present ids are left alone.
    async fn add_assigned_wash_area(
        &self,
        user_id: Uuid,
        wash_area_id: Uuid,
    ) -> Result<Option<UserPermissions>, AppError>;

    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait WashAreaStore: Send + Sync {
    async fn find_wash_area(&self, id: Uuid) -> Result<Option<WashArea>, AppError>;

    async fn list_wash_areas(&self, filter: &WashAreaFilter) -> Result<Vec<WashArea>, AppError>;
}

/// Postgres-backed store. Delegates to the query functions in
/// [`profile`] and [`wash_area`].
#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn fetch_permissions(&self, user_id: Uuid) -> Result<Option<UserPermissions>, AppError> {
        profile::find_permissions(&self.pool, user_id).await
    }

    async fn set_assigned_talukas(
        &self,
        user_id: Uuid,
        talukas: &[PlaceName],
    ) -> Result<Option<UserPermissions>, AppError> {
        profile::set_assigned_talukas(&self.pool, user_id, talukas).await
    }

    async fn add_assigned_wash_area(
        &self,
        user_id: Uuid,
        wash_area_id: Uuid,
    ) -> Result<Option<UserPermissions>, AppError> {
        profile::add_assigned_wash_area(&self.pool, user_id, wash_area_id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        profile::ping(&self.pool).await
    }
}

#[async_trait]
impl WashAreaStore for PgStore {
    async fn find_wash_area(&self, id: Uuid) -> Result<Option<WashArea>, AppError> {
        wash_area::find_by_id(&self.pool, id).await
    }

    async fn list_wash_areas(&self, filter: &WashAreaFilter) -> Result<Vec<WashArea>, AppError> {
        wash_area::list(&self.pool, filter).await
    }
}
