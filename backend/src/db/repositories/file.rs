//! JSON-file repository implementation.
//!
//! The whole store is kept in memory and written back to a single JSON file
//! after every successful mutation. Writes go to a sibling temporary file that
//! is then renamed over the target, so a crash never leaves a half-written
//! store behind. A mutation whose write fails is not applied in memory either.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::snapshot::StoreSnapshot;
use crate::db::repository::*;
use crate::models::{Coach, CoachId, Holiday, Material, MaterialId};

/// Repository persisted to a JSON snapshot file.
#[derive(Clone)]
pub struct FileRepository {
    path: PathBuf,
    store: Arc<RwLock<StoreSnapshot>>,
}

impl FileRepository {
    /// Open the store at `path`. A missing file is an empty store; the file is
    /// only created by the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();
        let store = load(&path)?;
        log::info!(
            "Opened file store at {} ({} coaches, {} materials, {} holidays)",
            path.display(),
            store.coaches.len(),
            store.materials.len(),
            store.holidays.len()
        );
        Ok(Self {
            path,
            store: Arc::new(RwLock::new(store)),
        })
    }

    /// Open the store at `path`, writing `seed` to it when the file does not exist yet.
    pub fn open_or_seed(path: impl Into<PathBuf>, seed: StoreSnapshot) -> RepositoryResult<Self> {
        let path = path.into();
        if path.exists() {
            return Self::open(path);
        }
        let mut seed = seed;
        seed.normalize();
        persist(&path, &seed)?;
        log::info!("Seeded new file store at {}", path.display());
        Ok(Self {
            path,
            store: Arc::new(RwLock::new(seed)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> RepositoryResult<T>) -> RepositoryResult<T> {
        f(&self.store.read())
    }

    /// Apply `f` to a copy of the store, persist the copy, then commit it.
    ///
    /// The write lock is held for the whole sequence so mutations are
    /// serialised and the file always matches memory. The file write is
    /// synchronous and blocks the calling runtime worker until it finishes.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreSnapshot) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut guard = self.store.write();
        let mut next = guard.clone();
        let out = f(&mut next)?;
        persist(&self.path, &next)?;
        *guard = next;
        Ok(out)
    }
}

fn io_context(operation: &str, path: &Path) -> ErrorContext {
    ErrorContext::new(operation).with_details(path.display().to_string())
}

fn load(path: &Path) -> RepositoryResult<StoreSnapshot> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StoreSnapshot::default()),
        Err(e) => {
            return Err(RepositoryError::storage_with_context(
                format!("Failed to read store file: {}", e),
                io_context("load", path),
            ))
        }
    };
    if raw.trim().is_empty() {
        return Ok(StoreSnapshot::default());
    }
    let mut store: StoreSnapshot = serde_json::from_str(&raw).map_err(|e| {
        RepositoryError::storage_with_context(
            format!("Store file is not valid JSON: {}", e),
            io_context("load", path),
        )
    })?;
    store.normalize();
    Ok(store)
}

fn persist(path: &Path, store: &StoreSnapshot) -> RepositoryResult<()> {
    let json = serde_json::to_string_pretty(store).map_err(|e| {
        RepositoryError::storage_with_context(
            format!("Failed to serialize store: {}", e),
            io_context("persist", path),
        )
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            RepositoryError::storage_with_context(
                format!("Failed to create store directory: {}", e),
                io_context("persist", path),
            )
        })?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)
        .and_then(|_| fs::rename(&tmp, path))
        .map_err(|e| {
            let _ = fs::remove_file(&tmp);
            RepositoryError::storage_with_context(
                format!("Failed to write store file: {}", e),
                io_context("persist", path),
            )
        })
}

#[async_trait]
impl CoachRepository for FileRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        Ok(self.path.exists() || dir.is_dir())
    }

    async fn list_coaches(&self) -> RepositoryResult<Vec<Coach>> {
        self.read(|store| Ok(store.coaches.clone()))
    }

    async fn get_coach(&self, coach_id: &CoachId) -> RepositoryResult<Coach> {
        self.read(|store| store.coach(coach_id).cloned())
    }

    async fn add_coach(&self, coach: &Coach) -> RepositoryResult<Coach> {
        self.mutate(|store| store.insert_coach(coach))
    }

    async fn update_coach(&self, coach: &Coach) -> RepositoryResult<Coach> {
        self.mutate(|store| store.replace_coach(coach))
    }

    async fn delete_coach(&self, coach_id: &CoachId) -> RepositoryResult<()> {
        self.mutate(|store| store.remove_coach(coach_id))
    }
}

#[async_trait]
impl MaterialRepository for FileRepository {
    async fn list_materials(&self) -> RepositoryResult<Vec<Material>> {
        self.read(|store| Ok(store.materials.clone()))
    }

    async fn get_material(&self, material_id: &MaterialId) -> RepositoryResult<Material> {
        self.read(|store| store.material(material_id).cloned())
    }

    async fn add_material(&self, material: &Material) -> RepositoryResult<Material> {
        self.mutate(|store| store.insert_material(material))
    }
}

#[async_trait]
impl HolidayRepository for FileRepository {
    async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>> {
        self.read(|store| Ok(store.holidays.clone()))
    }

    async fn add_holiday(&self, date: NaiveDate) -> RepositoryResult<(Holiday, bool)> {
        self.mutate(|store| Ok(store.insert_holiday(date)))
    }

    async fn remove_holiday(&self, date: NaiveDate) -> RepositoryResult<bool> {
        self.mutate(|store| Ok(store.remove_holiday(date)))
    }
}
