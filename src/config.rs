//! Client configuration: where the API lives and how to authenticate.
//!
//! Resolution order, later wins:
//! 1. built-in defaults
//! 2. `config.json` in the platform config directory
//! 3. `CODESIGN_URL` / `CODESIGN_TOKEN` / `CODESIGN_TIMEOUT_SECS`
//! 4. command-line flags (applied by the binary)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.json";

/// Default API base for a locally running backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001/api";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// API base URL including the `/api` prefix.
    pub base_url: String,
    /// Bearer token of the signed-in user.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl StudioConfig {
    /// Load from the user's config directory and the environment.
    /// Falls back to defaults if the file is missing or fails to parse.
    pub fn load() -> Self {
        let base = match config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        base.with_env()
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Apply `CODESIGN_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(
            std::env::var("CODESIGN_URL").ok(),
            std::env::var("CODESIGN_TOKEN").ok(),
            std::env::var("CODESIGN_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
        )
    }

    /// Replace fields that have an override; keep the rest.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(secs) = timeout_secs {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

/// `config.json` in the platform config directory.
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "codesign-studio")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(dirs.config_dir().join(CONFIG_FILE))
}
