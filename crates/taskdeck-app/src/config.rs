//! Client configuration loaded from `taskdeck.toml`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

/// Environment variable overriding the configured API base URL.
pub const ENV_API_URL: &str = "TASKDECK_API_URL";

const CONFIG_DIR: &str = "taskdeck";
const CONFIG_FILE: &str = "config.toml";
const SNAPSHOT_FILE: &str = "tasks.json";
const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Top-level configuration for the taskdeck client.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Backend endpoint settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Snapshot fallback settings.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

impl AppConfig {
    /// Load configuration from an explicit path, or from the default
    /// location when none is given. A missing file yields defaults; the
    /// `TASKDECK_API_URL` environment variable always wins over the file.
    ///
    /// # Errors
    /// Returns an error when the file exists but cannot be read or parsed,
    /// or when validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(Self::default_config_path, Path::to_path_buf);
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_owned();
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            bail!("api.base_url must not be empty");
        }
        Ok(())
    }

    /// Default config file location: `<config dir>/taskdeck/config.toml`,
    /// falling back to the current directory when no config dir exists.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Resolved snapshot path, or `None` when the fallback is disabled.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        if !self.snapshot.enabled {
            return None;
        }
        Some(self.snapshot.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CONFIG_DIR)
                .join(SNAPSHOT_FILE)
        }))
    }
}

/// Backend endpoint block.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the task API, e.g. `http://localhost:5000/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

/// Snapshot fallback block.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Whether to keep (and fall back to) a last-known-good snapshot.
    #[serde(default = "default_snapshot_enabled")]
    pub enabled: bool,
    /// Snapshot file location; defaults under the user data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

const fn default_snapshot_enabled() -> bool {
    true
}
