use axum::extract::FromRef;
use shared_types::CityTalukaMap;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Settings;
use crate::repo::{ProfileStore, WashAreaStore};

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers and middleware can extract a single part,
/// e.g. `State<Arc<dyn ProfileStore>>` or `State<Arc<Settings>>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub wash_areas: Arc<dyn WashAreaStore>,
    pub regions: Arc<CityTalukaMap>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build state around one store that serves both profiles and wash areas.
    pub fn new<S>(store: Arc<S>, settings: Settings) -> Self
    where
        S: ProfileStore + WashAreaStore + 'static,
    {
        Self {
            profiles: store.clone(),
            wash_areas: store,
            regions: Arc::new(settings.regions.clone()),
            settings: Arc::new(settings),
        }
    }
}

/// Create the connection pool. Uses `connect_lazy` so no connections open
/// until the first query.
pub fn create_pool(settings: &Settings) -> Result<Pool<Postgres>, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(&settings.database_url)
}

/// Run database migrations against the given pool.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
