//! Coach entity and its lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::material::MaterialId;
use super::time::day_of;
use crate::define_id_type;

define_id_type!(CoachId, "coach");

/// Work types offered by the add-coach form. Free text outside this list is accepted.
pub const WORK_TYPE_CATALOGUE: [&str; 5] = [
    "General Overhaul",
    "Interior Refurbishment",
    "Exterior Painting",
    "Wheelset Replacement",
    "Head Stock Repair",
];

/// Coach lifecycle state. `Active -> Completed` is one-way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachStatus {
    #[default]
    Active,
    Completed,
}

/// A quantity of one material consumed by a coach on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEntry {
    pub material_id: MaterialId,
    pub quantity: u64,
    pub date: NaiveDate,
}

impl UsageEntry {
    pub fn new(material_id: impl Into<MaterialId>, quantity: u64, date: NaiveDate) -> Self {
        Self {
            material_id: material_id.into(),
            quantity,
            date,
        }
    }
}

/// A railway coach tracked through the workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub id: CoachId,
    pub coach_number: String,
    pub offered_date: NaiveDate,
    pub work_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<UsageEntry>,
    #[serde(default)]
    pub status: CoachStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
    /// Store-managed version used for optimistic concurrency on updates.
    #[serde(default)]
    pub revision: u64,
}

impl Coach {
    /// Register a coach from validated input: active, no materials.
    pub fn register(id: CoachId, new: NewCoach) -> Result<Self, DomainError> {
        let new = new.validate()?;
        Ok(Self {
            id,
            coach_number: new.coach_number,
            offered_date: new.offered_date,
            work_types: new.work_types,
            notes: new.notes,
            materials: Vec::new(),
            status: CoachStatus::Active,
            completion_date: None,
            revision: 0,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == CoachStatus::Active
    }

    /// Mark the coach completed at `now`.
    ///
    /// A second call is rejected and leaves the original completion moment untouched.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyCompleted(self.id.clone()));
        }
        self.status = CoachStatus::Completed;
        self.completion_date = Some(now);
        Ok(())
    }

    /// Hard deletion is only allowed while the coach is active.
    pub fn ensure_removable(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::NotRemovable(self.id.clone()))
        }
    }

    /// Day the coach's work is attributed to: completion day when completed,
    /// intake day otherwise.
    pub fn report_date(&self) -> NaiveDate {
        match (self.status, self.completion_date) {
            (CoachStatus::Completed, Some(done)) => day_of(done),
            _ => self.offered_date,
        }
    }
}

/// Input of the add-coach flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCoach {
    pub coach_number: String,
    pub offered_date: NaiveDate,
    pub work_types: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewCoach {
    const MIN_NUMBER_LEN: usize = 2;

    /// Trim and check the input. Duplicate work types collapse onto their
    /// first occurrence; blank notes become `None`.
    pub fn validate(self) -> Result<Self, DomainError> {
        let coach_number = self.coach_number.trim().to_string();

        let mut work_types: Vec<String> = Vec::with_capacity(self.work_types.len());
        let mut blank_work_type = false;
        for work_type in self.work_types {
            let work_type = work_type.trim();
            if work_type.is_empty() {
                blank_work_type = true;
            } else if !work_types.iter().any(|w| w == work_type) {
                work_types.push(work_type.to_string());
            }
        }

        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut problems = Vec::new();
        if coach_number.chars().count() < Self::MIN_NUMBER_LEN {
            problems.push(format!(
                "coach number must be at least {} characters",
                Self::MIN_NUMBER_LEN
            ));
        }
        if blank_work_type {
            problems.push("work types must not be blank".to_string());
        }
        if work_types.is_empty() {
            problems.push("at least one work type is required".to_string());
        }
        if !problems.is_empty() {
            return Err(DomainError::invalid("coach", problems));
        }

        Ok(Self {
            coach_number,
            offered_date: self.offered_date,
            work_types,
            notes,
        })
    }
}
