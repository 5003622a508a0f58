use async_trait::async_trait;
use shared_types::{AppError, PlaceName, UserPermissions, WashArea, WashAreaFilter};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProfileStore, WashAreaStore};

/// In-process store for tests and local demos.
///
/// [`MemoryStore::set_unavailable`] makes every call fail with a database
/// error, which is how callers exercise the outage paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<HashMap<Uuid, UserPermissions>>,
    wash_areas: RwLock<HashMap<Uuid, WashArea>>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: UserPermissions) -> Self {
        self.profiles.get_mut().insert(profile.user_id, profile);
        self
    }

    pub fn with_wash_area(mut self, area: WashArea) -> Self {
        self.wash_areas.get_mut().insert(area.id, area);
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::database("profile store unavailable"));
        }
        Ok(())
    }

    fn matches(area: &WashArea, filter: &WashAreaFilter) -> bool {
        let same = |wanted: &Option<PlaceName>, actual: Option<PlaceName>| match wanted {
            Some(wanted) => actual.as_ref() == Some(wanted),
            None => true,
        };
        same(&filter.city, area.city_name()) && same(&filter.taluka, area.taluka_name())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn fetch_permissions(&self, user_id: Uuid) -> Result<Option<UserPermissions>, AppError> {
        self.check_available()?;
        Ok(self.profiles.read().await.get(&user_id).cloned())
    }

    async fn set_assigned_talukas(
        &self,
        user_id: Uuid,
        talukas: &[PlaceName],
    ) -> Result<Option<UserPermissions>, AppError> {
        self.check_available()?;
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|profile| {
            profile.scope.assigned_talukas = talukas.to_vec();
            profile.clone()
        }))
    }

    async fn add_assigned_wash_area(
        &self,
        user_id: Uuid,
        wash_area_id: Uuid,
    ) -> Result<Option<UserPermissions>, AppError> {
        self.check_available()?;
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|profile| {
            let areas = &mut profile.scope.assigned_wash_areas;
            if !areas.contains(&wash_area_id) {
                areas.push(wash_area_id);
            }
            profile.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_available()
    }
}

#[async_trait]
impl WashAreaStore for MemoryStore {
    async fn find_wash_area(&self, id: Uuid) -> Result<Option<WashArea>, AppError> {
        self.check_available()?;
        Ok(self.wash_areas.read().await.get(&id).cloned())
    }

    async fn list_wash_areas(&self, filter: &WashAreaFilter) -> Result<Vec<WashArea>, AppError> {
        self.check_available()?;
        let mut areas: Vec<WashArea> = self
            .wash_areas
            .read()
            .await
            .values()
            .filter(|area| Self::matches(area, filter))
            .cloned()
            .collect();
        areas.sort_by(|a, b| {
            (a.city_name(), a.taluka_name(), &a.name).cmp(&(b.city_name(), b.taluka_name(), &b.name))
        });
        Ok(areas)
    }
}
