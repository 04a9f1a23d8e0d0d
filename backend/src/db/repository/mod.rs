//! Repository trait definitions (storage ports).
//!
//! Storage is split per entity so adapters and tests can stay focused.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`coach`]: Coach records, revision-checked whole-record updates
//! - [`material`]: Append-only material catalogue
//! - [`holiday`]: De-duplicated holiday calendar
//!
//! # Convenience Trait Bound
//!
//! For functions that need every store, use the [`FullRepository`] trait bound:
//!
//! ```ignore
//! async fn my_service<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<()> {
//!     let coaches = repo.list_coaches().await?;
//!     let holidays = repo.list_holidays().await?;
//!     Ok(())
//! }
//! ```

pub mod coach;
pub mod error;
pub mod holiday;
pub mod material;

// Re-export error types
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

// Re-export all traits
pub use coach::CoachRepository;
pub use holiday::HolidayRepository;
pub use material::MaterialRepository;

/// Composite trait bound for a complete repository implementation.
///
/// Automatically implemented for any type that implements all three
/// repository traits.
pub trait FullRepository: CoachRepository + MaterialRepository + HolidayRepository {}

// Blanket implementation: any type implementing all three traits automatically implements FullRepository
impl<T> FullRepository for T where T: CoachRepository + MaterialRepository + HolidayRepository {}
