//! Material store port. Materials are append-only.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Material, MaterialId};

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    /// List materials in insertion order.
    async fn list_materials(&self) -> RepositoryResult<Vec<Material>>;

    /// Retrieve one material, `NotFound` when unknown.
    async fn get_material(&self, material_id: &MaterialId) -> RepositoryResult<Material>;

    /// Append a material. Fails with `Conflict` when the ID is already taken.
    async fn add_material(&self, material: &Material) -> RepositoryResult<Material>;
}
