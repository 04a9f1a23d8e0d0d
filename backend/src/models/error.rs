//! Domain errors raised by entity validation and lifecycle transitions.

use super::coach::CoachId;

/// Errors raised by the domain model itself, independent of storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Creation input failed validation. Every failing field is listed.
    #[error("invalid {entity}: {}", .problems.join("; "))]
    Invalid {
        entity: &'static str,
        problems: Vec<String>,
    },

    /// The one-way `active -> completed` transition was attempted twice.
    #[error("coach {0} is already completed")]
    AlreadyCompleted(CoachId),

    /// Only active coaches may be removed.
    #[error("coach {0} is completed and cannot be removed")]
    NotRemovable(CoachId),
}

impl DomainError {
    pub fn invalid(entity: &'static str, problems: Vec<String>) -> Self {
        Self::Invalid { entity, problems }
    }
}
