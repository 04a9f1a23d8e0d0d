//! Whole-store state shared by the in-memory and file-backed repositories.
//!
//! All invariants enforced at the storage boundary live here: unique IDs,
//! revision checks on coach updates, deletion of active coaches only, and one
//! holiday per calendar day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Coach, CoachId, Holiday, Material, MaterialId};

/// Every entity of the store. This is also the on-disk format of the file repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub coaches: Vec<Coach>,
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Kept sorted by date.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

impl StoreSnapshot {
    fn coach_position(&self, coach_id: &CoachId) -> Option<usize> {
        self.coaches.iter().position(|c| &c.id == coach_id)
    }

    fn coach_not_found(operation: &str, coach_id: &CoachId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Coach {} not found", coach_id),
            ErrorContext::new(operation)
                .with_entity("coach")
                .with_entity_id(coach_id),
        )
    }

    pub fn coach(&self, coach_id: &CoachId) -> RepositoryResult<&Coach> {
        self.coach_position(coach_id)
            .map(|i| &self.coaches[i])
            .ok_or_else(|| Self::coach_not_found("get_coach", coach_id))
    }

    pub fn insert_coach(&mut self, coach: &Coach) -> RepositoryResult<Coach> {
        if self.coach_position(&coach.id).is_some() {
            return Err(RepositoryError::conflict_with_context(
                format!("Coach {} already exists", coach.id),
                ErrorContext::new("add_coach")
                    .with_entity("coach")
                    .with_entity_id(&coach.id),
            ));
        }
        let stored = Coach {
            revision: 0,
            ..coach.clone()
        };
        self.coaches.push(stored.clone());
        Ok(stored)
    }

    pub fn replace_coach(&mut self, coach: &Coach) -> RepositoryResult<Coach> {
        let index = self
            .coach_position(&coach.id)
            .ok_or_else(|| Self::coach_not_found("update_coach", &coach.id))?;

        let current = self.coaches[index].revision;
        if current != coach.revision {
            return Err(RepositoryError::stale_revision(
                format!(
                    "Coach {} was modified concurrently (revision {} expected, {} stored)",
                    coach.id, coach.revision, current
                ),
                ErrorContext::new("update_coach")
                    .with_entity("coach")
                    .with_entity_id(&coach.id),
            ));
        }

        let stored = Coach {
            revision: current + 1,
            ..coach.clone()
        };
        self.coaches[index] = stored.clone();
        Ok(stored)
    }

    pub fn remove_coach(&mut self, coach_id: &CoachId) -> RepositoryResult<()> {
        let index = self
            .coach_position(coach_id)
            .ok_or_else(|| Self::coach_not_found("delete_coach", coach_id))?;
        self.coaches[index].ensure_removable()?;
        self.coaches.remove(index);
        Ok(())
    }

    pub fn material(&self, material_id: &MaterialId) -> RepositoryResult<&Material> {
        self.materials
            .iter()
            .find(|m| &m.id == material_id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Material {} not found", material_id),
                    ErrorContext::new("get_material")
                        .with_entity("material")
                        .with_entity_id(material_id),
                )
            })
    }

    pub fn insert_material(&mut self, material: &Material) -> RepositoryResult<Material> {
        if self.materials.iter().any(|m| m.id == material.id) {
            return Err(RepositoryError::conflict_with_context(
                format!("Material {} already exists", material.id),
                ErrorContext::new("add_material")
                    .with_entity("material")
                    .with_entity_id(&material.id),
            ));
        }
        self.materials.push(material.clone());
        Ok(material.clone())
    }

    pub fn insert_holiday(&mut self, date: NaiveDate) -> (Holiday, bool) {
        match self.holidays.binary_search_by_key(&date, |h| h.date) {
            Ok(i) => (self.holidays[i].clone(), false),
            Err(i) => {
                let holiday = Holiday::new(date);
                self.holidays.insert(i, holiday.clone());
                (holiday, true)
            }
        }
    }

    pub fn remove_holiday(&mut self, date: NaiveDate) -> bool {
        match self.holidays.binary_search_by_key(&date, |h| h.date) {
            Ok(i) => {
                self.holidays.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Restore the sorted-holidays invariant after loading external data.
    pub fn normalize(&mut self) {
        self.holidays.sort_by_key(|h| h.date);
        self.holidays.dedup_by_key(|h| h.date);
    }
}
