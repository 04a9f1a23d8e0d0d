//! Material inventory entities.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use crate::define_id_type;

define_id_type!(MaterialId, "mat");

/// Party that financially owns a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Ownership {
    Railway,
    #[serde(rename = "SSWPI")]
    Sswpi,
}

impl Ownership {
    /// Single-letter badge shown next to the owner name.
    pub fn code(&self) -> char {
        match self {
            Ownership::Railway => 'R',
            Ownership::Sswpi => 'S',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ownership::Railway => "Railway",
            Ownership::Sswpi => "SSWPI",
        }
    }
}

impl std::fmt::Display for Ownership {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

/// A material type that coaches can consume.
///
/// Stock figures are informational: recording usage never decrements them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub material_code: String,
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ownership: Ownership,
}

impl Material {
    /// Build a material from validated input.
    pub fn create(id: MaterialId, new: NewMaterial) -> Result<Self, DomainError> {
        let new = new.validate()?;
        Ok(Self {
            id,
            name: new.name,
            material_code: new.material_code,
            unit: new.unit,
            stock_quantity: new.stock_quantity,
            min_stock_level: new.min_stock_level,
            description: new.description,
            ownership: new.ownership,
        })
    }

    /// True when both stock figures are known and stock sits below the minimum.
    pub fn is_below_minimum(&self) -> bool {
        matches!(
            (self.stock_quantity, self.min_stock_level),
            (Some(stock), Some(min)) if stock < min
        )
    }
}

/// Input of the add-material flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMaterial {
    pub name: String,
    pub material_code: String,
    pub unit: String,
    #[serde(default)]
    pub stock_quantity: Option<u32>,
    #[serde(default)]
    pub min_stock_level: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    pub ownership: Ownership,
}

impl NewMaterial {
    const MIN_NAME_LEN: usize = 3;

    /// Trim text fields and check them, returning the normalised input.
    pub fn validate(self) -> Result<Self, DomainError> {
        let name = self.name.trim().to_string();
        let material_code = self.material_code.trim().to_string();
        let unit = self.unit.trim().to_string();
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let mut problems = Vec::new();
        if name.chars().count() < Self::MIN_NAME_LEN {
            problems.push(format!(
                "material name must be at least {} characters",
                Self::MIN_NAME_LEN
            ));
        }
        if material_code.is_empty() {
            problems.push("material code is required".to_string());
        }
        if unit.is_empty() {
            problems.push("unit is required".to_string());
        }
        if !problems.is_empty() {
            return Err(DomainError::invalid("material", problems));
        }

        Ok(Self {
            name,
            material_code,
            unit,
            description,
            ..self
        })
    }
}
