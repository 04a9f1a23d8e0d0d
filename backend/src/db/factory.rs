//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use super::fixtures;
use super::repo_config::RepositoryConfig;
use super::repositories::{FileRepository, LocalRepository, StoreSnapshot};
use super::repository::{FullRepository, RepositoryError, RepositoryResult};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local repository
    Local,
    /// JSON snapshot file
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local"/"memory", "file"/"json").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            "file" | "json" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, a set `COACHTRACK_DATA_FILE`
    /// selects the file store, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or_else(|e| {
                log::warn!("{}; falling back to the local repository", e);
                Self::Local
            });
        }

        if std::env::var("COACHTRACK_DATA_FILE").is_ok() {
            Self::File
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use coachtrack::db::{RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let file_repo = RepositoryFactory::create(RepositoryType::File, Some("store.json".as_ref()))?;
///     let local_repo = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `data_file` - Store location (required for File)
    pub fn create(
        repo_type: RepositoryType,
        data_file: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::File => {
                let path = data_file.ok_or_else(|| {
                    RepositoryError::configuration("File repository requires a data file path")
                })?;
                let repo = Self::create_file(path)?;
                Ok(repo as Arc<dyn FullRepository>)
            }
        }
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create a file repository at `path`.
    pub fn create_file(path: impl Into<PathBuf>) -> RepositoryResult<Arc<FileRepository>> {
        Ok(Arc::new(FileRepository::open(path)?))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE` and `COACHTRACK_DATA_FILE`.
    pub fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::default().with_env_overrides();
        Self::from_repository_config(&config)
    }

    /// Create repository from a TOML configuration file. Environment
    /// variables take precedence over the file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?.with_env_overrides();
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance, seeding it with
    /// the demo data when `[seed] demo_data` is set.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;
        let seed = if config.seed.demo_data {
            fixtures::demo_snapshot()
        } else {
            StoreSnapshot::default()
        };

        log::info!(
            "Creating {:?} repository (demo seed: {})",
            repo_type,
            config.seed.demo_data
        );
        match repo_type {
            RepositoryType::Local => Ok(Arc::new(LocalRepository::with_snapshot(seed))),
            RepositoryType::File => Ok(Arc::new(FileRepository::open_or_seed(
                config.file.path.clone(),
                seed,
            )?)),
        }
    }
}
