use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Credentials;

pub const APP_DIR: &str = "tamalog-tui";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TamalogConfig {
    /// Web API key of the Firebase project.
    #[serde(default)]
    pub api_key: String,
    /// Firebase / Google Cloud project id, e.g. "kenko-cheers".
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_firestore_url")]
    pub firestore_url: String,
    /// Viewports narrower than this (in pixels) get the mobile layout.
    #[serde(default = "default_mobile_breakpoint_px")]
    pub mobile_breakpoint_px: u32,
    /// Assumed width of one terminal cell when the terminal doesn't report pixels.
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u32,
    /// Account used by the trial login button.
    #[serde(default = "default_demo_email")]
    pub demo_email: String,
    #[serde(default = "default_demo_password")]
    pub demo_password: String,
}

fn default_auth_url() -> String {
    firebase::IDENTITY_TOOLKIT_URL.to_string()
}

fn default_token_url() -> String {
    firebase::SECURE_TOKEN_URL.to_string()
}

fn default_firestore_url() -> String {
    firebase::FIRESTORE_URL.to_string()
}

fn default_mobile_breakpoint_px() -> u32 {
    768
}

fn default_cell_width_px() -> u32 {
    8
}

fn default_demo_email() -> String {
    "aiu5@gmail.com".to_string()
}

fn default_demo_password() -> String {
    "123456".to_string()
}

impl Default for TamalogConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            firestore_url: default_firestore_url(),
            mobile_breakpoint_px: default_mobile_breakpoint_px(),
            cell_width_px: default_cell_width_px(),
            demo_email: default_demo_email(),
            demo_password: default_demo_password(),
        }
    }
}

impl TamalogConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join(APP_DIR)
            .join("config.toml"))
    }

    /// Load config from disk, then apply `TAMALOG_*` environment overrides.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::from_toml(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = var("TAMALOG_API_KEY") {
            self.api_key = api_key;
        }
        if let Some(project_id) = var("TAMALOG_PROJECT_ID") {
            self.project_id = project_id;
        }
    }

    /// Write the config file if it doesn't exist yet. Returns its path.
    pub fn ensure_file() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save()?;
        }
        Ok(path)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    /// Fail early with a readable message instead of a 400 from Google.
    pub fn require_firebase(&self) -> Result<()> {
        if self.api_key.is_empty() || self.project_id.is_empty() {
            anyhow::bail!(
                "Firebase is not configured. Set api_key and project_id in {} \
                 (or TAMALOG_API_KEY / TAMALOG_PROJECT_ID), or use `tamalog-tui dev`.",
                Self::config_path()?.display()
            );
        }
        Ok(())
    }

    pub fn demo_credentials(&self) -> Credentials {
        Credentials::new(&self.demo_email, &self.demo_password)
    }
}
