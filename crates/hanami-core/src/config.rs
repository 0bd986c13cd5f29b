use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::HanamiError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub recommendations: RecommendationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub base_url: String,
    pub search_limit: u32,
    pub upcoming_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage key; the watchlist lives in `<data_dir>/<key>.json`.
    pub key: String,
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    pub fetch_limit: u32,
    pub max_results: usize,
}

impl AppConfig {
    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, HanamiError> {
        Self::load_from(&Self::config_path())
    }

    /// Same as [`AppConfig::load`] with an explicit user file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, HanamiError> {
        let mut merged = parse_table(DEFAULT_CONFIG)?;

        if path.exists() {
            let user_str = std::fs::read_to_string(path)?;
            merge_tables(&mut merged, parse_table(&user_str)?);
            tracing::debug!(path = %path.display(), "Loaded user config");
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| HanamiError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Directory holding the watchlist file.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "hanami")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn parse_table(source: &str) -> Result<toml::Table, HanamiError> {
    source
        .parse::<toml::Table>()
        .map_err(|e| HanamiError::Config(e.to_string()))
}

/// Recursively overlay `overlay` onto `base`; scalar keys in `overlay` win.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                    continue;
                }
                base.insert(key, toml::Value::Table(incoming));
            }
            other => {
                base.insert(key, other);
            }
        }
    }
}
