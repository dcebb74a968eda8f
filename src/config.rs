use std::path::{Path, PathBuf};
use std::time::Duration;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::locator::LookupStrategy;
use crate::manifest::DependencyGroup;
use crate::registry::npm::DEFAULT_BASE_URL;
use crate::version::CheckOptions;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Delay between starting each fetch request to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid manifest pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Analyser configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyserConfig {
    pub registry: RegistryConfig,
    pub groups: GroupsConfig,
    /// Only flag dependencies with a newer *stable* release
    pub stable_only: bool,
    /// Overrides the pattern deciding which files are manifests
    pub file_regex: Option<String>,
    pub lookup: LookupStrategy,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            groups: GroupsConfig::default(),
            stable_only: true,
            file_regex: None,
            lookup: LookupStrategy::default(),
        }
    }
}

impl AnalyserConfig {
    /// Load configuration from a JSON file; missing fields use defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Compiled `file_regex`, if set
    pub fn manifest_pattern(&self) -> Result<Option<Regex>, ConfigError> {
        Ok(self.file_regex.as_deref().map(Regex::new).transpose()?)
    }

    pub fn check_options(&self) -> CheckOptions {
        CheckOptions {
            stable: self.stable_only,
        }
    }
}

/// Registry connection settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub url: String,
    /// Request timeout in milliseconds
    pub timeout: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BASE_URL.to_string(),
            timeout: FETCH_TIMEOUT_MS,
        }
    }
}

impl RegistryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

/// Which dependency groups are checked
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupsConfig {
    pub dependencies: bool,
    pub dev_dependencies: bool,
    pub optional_dependencies: bool,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            dependencies: true,
            dev_dependencies: true,
            optional_dependencies: true,
        }
    }
}

impl GroupsConfig {
    pub fn is_enabled(&self, group: DependencyGroup) -> bool {
        match group {
            DependencyGroup::Dependencies => self.dependencies,
            DependencyGroup::DevDependencies => self.dev_dependencies,
            DependencyGroup::OptionalDependencies => self.optional_dependencies,
        }
    }

    /// Enabled groups in report order
    pub fn enabled(&self) -> Vec<DependencyGroup> {
        DependencyGroup::ALL
            .into_iter()
            .filter(|group| self.is_enabled(*group))
            .collect()
    }
}

/// Returns the path to the data directory for npm-stale.
/// Uses $XDG_DATA_HOME/npm-stale if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/npm-stale,
/// or ./npm-stale if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("npm-stale.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("npm-stale")
}
