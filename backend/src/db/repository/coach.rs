//! Coach store port.
//!
//! Coaches are written as whole records. Updates are guarded by the record's
//! `revision`: an update built from a stale read is rejected with a retryable
//! [`RepositoryError::Conflict`](super::RepositoryError), so concurrent
//! material submissions cannot silently overwrite each other.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Coach, CoachId};

/// Repository trait for coach records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait CoachRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    async fn health_check(&self) -> RepositoryResult<bool>;

    // ==================== Coach Operations ====================

    /// List every coach, in no particular order.
    async fn list_coaches(&self) -> RepositoryResult<Vec<Coach>>;

    /// Retrieve one coach.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the coach doesn't exist
    async fn get_coach(&self, coach_id: &CoachId) -> RepositoryResult<Coach>;

    /// Store a newly registered coach. Its revision is reset to `0`.
    ///
    /// # Returns
    /// * `Err(RepositoryError::Conflict)` - If the ID is already taken
    async fn add_coach(&self, coach: &Coach) -> RepositoryResult<Coach>;

    /// Replace a stored coach with `coach`.
    ///
    /// `coach.revision` must equal the stored revision; the stored copy gets
    /// the next revision and is returned.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the coach doesn't exist
    /// * `Err(RepositoryError::Conflict)` - If the revision is stale (retryable)
    async fn update_coach(&self, coach: &Coach) -> RepositoryResult<Coach>;

    /// Hard-delete a coach. Only active coaches can be deleted.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the coach doesn't exist
    /// * `Err(RepositoryError::Conflict)` - If the coach is completed
    async fn delete_coach(&self, coach_id: &CoachId) -> RepositoryResult<()>;
}
