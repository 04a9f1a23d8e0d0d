//! Storage for coaches, materials and holidays.
//!
//! This module provides abstractions for storage operations via the Repository pattern,
//! allowing different storage backends to be swapped easily.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, tests)                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Local Repository │     │ File Repository         │
//! │ (in-memory)      │     │ (JSON snapshot)         │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level business logic functions (use these in your application!)
//! - `repository`: Trait definitions for storage operations
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `repositories::file`: JSON file implementation for single-node deployments
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: `coachtrack.toml` loading
//!
//! The repository is created once at startup and passed to whoever needs it;
//! there is no process-wide instance.
//!
//! # Recommended Usage
//!
//! ```ignore
//! use coachtrack::db::{services, RepositoryFactory, RepositoryType};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create(RepositoryType::File, Some("store.json".as_ref()))?;
//!     let coaches = services::list_coaches(repo.as_ref(), services::CoachFilter::All).await?;
//!     Ok(())
//! }
//! ```

pub mod factory;
pub mod fixtures;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;


// ==================== Service Layer ====================

pub use services::{
    add_coach, add_holiday, add_material, coach_details, complete_coach, get_coach, get_material,
    health_check, list_coaches, list_holidays, list_materials, low_stock_materials,
    monthly_report, record_material_usage, remove_coach, remove_holiday, report_years,
    CoachDetails, CoachFilter,
};

// ==================== Repository Pattern Exports ====================

pub use repo_config::{RepositoryConfig, UpdatePolicy};

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{FileRepository, LocalRepository, StoreSnapshot};
pub use repository::{
    CoachRepository, ErrorContext, FullRepository, HolidayRepository, MaterialRepository,
    RepositoryError, RepositoryResult,
};
