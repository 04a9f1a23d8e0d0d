//! Repository configuration file support.
//!
//! This module reads `coachtrack.toml`, which selects the storage adapter and
//! tunes the material-update retry loop. Every section is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub file: FileSettings,
    #[serde(default)]
    pub updates: UpdatePolicy,
    #[serde(default)]
    pub seed: SeedSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// JSON file store settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_data_file")]
    pub path: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            path: default_data_file(),
        }
    }
}

/// Bounded retry policy for revision conflicts on coach updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePolicy {
    /// Retries after the first attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Whether an empty store starts with the demo workshop data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedSettings {
    #[serde(default)]
    pub demo_data: bool,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_data_file() -> PathBuf {
    PathBuf::from("coachtrack-data.json")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    25
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `coachtrack.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if found and parsed successfully
    /// * `Err(RepositoryError)` if no config file found or parse error
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("coachtrack.toml"),
            PathBuf::from("backend/coachtrack.toml"),
            PathBuf::from("../coachtrack.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No coachtrack.toml found in standard locations",
        ))
    }

    /// Apply `REPOSITORY_TYPE` and `COACHTRACK_DATA_FILE` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            self.repository.repo_type = repo_type;
        }
        if let Ok(path) = std::env::var("COACHTRACK_DATA_FILE") {
            if !path.trim().is_empty() {
                self.file.path = PathBuf::from(path);
            }
        }
        self
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local_config() {
        let toml = r#"
[repository]
type = "local"
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository.repo_type, "local");
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
        assert_eq!(config.updates, UpdatePolicy::default());
        assert!(!config.seed.demo_data);
    }

    #[test]
    fn test_parse_file_config() {
        let toml = r#"
[repository]
type = "file"

[file]
path = "/var/lib/coachtrack/store.json"

[updates]
max_retries = 5
retry_delay_ms = 250

[seed]
demo_data = true
"#;

        let config = RepositoryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.repository_type().unwrap(), RepositoryType::File);
        assert_eq!(
            config.file.path,
            PathBuf::from("/var/lib/coachtrack/store.json")
        );
        assert_eq!(config.updates.max_retries, 5);
        assert_eq!(config.updates.retry_delay_ms, 250);
        assert!(config.seed.demo_data);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = RepositoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, RepositoryConfig::default());
        assert_eq!(config.repository_type().unwrap(), RepositoryType::Local);
    }

    #[test]
    fn test_invalid_type_is_reported() {
        let config = RepositoryConfig::from_toml_str("[repository]\ntype = \"postgres\"\n").unwrap();
        assert!(config.repository_type().is_err());
        assert!(matches!(
            RepositoryConfig::from_toml_str("[updates]\nmax_retries = \"many\"\n"),
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
