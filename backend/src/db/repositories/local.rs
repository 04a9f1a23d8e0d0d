//! In-memory local repository implementation.
//!
//! All data lives in a single [`StoreSnapshot`] behind a lock, which makes the
//! repository fast, deterministic and isolated. It is the default store for
//! development and the one used throughout the tests.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::sync::Arc;

use super::snapshot::StoreSnapshot;
use crate::db::fixtures;
use crate::db::repository::*;
use crate::models::{Coach, CoachId, Holiday, Material, MaterialId};

/// In-memory local repository.
///
/// Cloning is cheap and every clone shares the same underlying store.
///
/// # Example
/// ```
/// use coachtrack::db::repositories::LocalRepository;
/// use coachtrack::db::repository::CoachRepository;
///
/// # tokio_test_block_on(async {
/// let repo = LocalRepository::demo();
/// let coaches = repo.list_coaches().await.unwrap();
/// assert!(!coaches.is_empty());
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Runtime::new().unwrap().block_on(f)
/// # }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    store: StoreSnapshot,

    // Connection health
    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::with_snapshot(StoreSnapshot::default())
    }

    /// Create a repository pre-populated with `store`.
    pub fn with_snapshot(mut store: StoreSnapshot) -> Self {
        store.normalize();
        Self {
            data: Arc::new(RwLock::new(LocalData {
                store,
                is_healthy: true,
            })),
        }
    }

    /// Create a repository seeded with the demo workshop data.
    pub fn demo() -> Self {
        Self::with_snapshot(fixtures::demo_snapshot())
    }

    /// Set the health status (for testing failure scenarios).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        self.data.write().store = StoreSnapshot::default();
    }

    /// Copy of the whole store.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.data.read().store.clone()
    }

    /// Get the number of coaches stored.
    pub fn coach_count(&self) -> usize {
        self.data.read().store.coaches.len()
    }

    /// Get the number of materials stored.
    pub fn material_count(&self) -> usize {
        self.data.read().store.materials.len()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Local store is not healthy"));
        }
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> RepositoryResult<T>) -> RepositoryResult<T> {
        self.check_health()?;
        f(&self.data.read().store)
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut StoreSnapshot) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        self.check_health()?;
        f(&mut self.data.write().store)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoachRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_coaches(&self) -> RepositoryResult<Vec<Coach>> {
        self.read(|store| Ok(store.coaches.clone()))
    }

    async fn get_coach(&self, coach_id: &CoachId) -> RepositoryResult<Coach> {
        self.read(|store| store.coach(coach_id).cloned())
    }

    async fn add_coach(&self, coach: &Coach) -> RepositoryResult<Coach> {
        self.write(|store| store.insert_coach(coach))
    }

    async fn update_coach(&self, coach: &Coach) -> RepositoryResult<Coach> {
        self.write(|store| store.replace_coach(coach))
    }

    async fn delete_coach(&self, coach_id: &CoachId) -> RepositoryResult<()> {
        self.write(|store| store.remove_coach(coach_id))
    }
}

#[async_trait]
impl MaterialRepository for LocalRepository {
    async fn list_materials(&self) -> RepositoryResult<Vec<Material>> {
        self.read(|store| Ok(store.materials.clone()))
    }

    async fn get_material(&self, material_id: &MaterialId) -> RepositoryResult<Material> {
        self.read(|store| store.material(material_id).cloned())
    }

    async fn add_material(&self, material: &Material) -> RepositoryResult<Material> {
        self.write(|store| store.insert_material(material))
    }
}

#[async_trait]
impl HolidayRepository for LocalRepository {
    async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>> {
        self.read(|store| Ok(store.holidays.clone()))
    }

    async fn add_holiday(&self, date: NaiveDate) -> RepositoryResult<(Holiday, bool)> {
        self.write(|store| Ok(store.insert_holiday(date)))
    }

    async fn remove_holiday(&self, date: NaiveDate) -> RepositoryResult<bool> {
        self.write(|store| Ok(store.remove_holiday(date)))
    }
}
