use crate::constants;
use crate::error::{DashboardError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub analytics: AnalyticsConfig,
    pub sheets: SheetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Pre-built frontend served at `/` when set
    pub static_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: constants::DEFAULT_PORT,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub property_id: String,
    /// Report name -> GA4 property id
    pub property_overrides: HashMap<String, String>,
    pub credentials_file: String,
    pub api_base: String,
    pub token_uri: String,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        let property_overrides = ["overview", "events", "sources", "demographics"]
            .iter()
            .map(|name| (name.to_string(), constants::MARKETING_PROPERTY_ID.to_string()))
            .collect();
        Self {
            property_id: constants::DEFAULT_PROPERTY_ID.to_string(),
            property_overrides,
            credentials_file: constants::DEFAULT_CREDENTIALS_FILE.to_string(),
            api_base: constants::GA_API_BASE.to_string(),
            token_uri: constants::GOOGLE_TOKEN_URI.to_string(),
            timeout_seconds: 15,
            max_attempts: 3,
        }
    }
}

impl AnalyticsConfig {
    /// GA4 property a report reads from
    pub fn property_for(&self, report: &str) -> &str {
        self.property_overrides
            .get(report)
            .map(String::as_str)
            .unwrap_or(&self.property_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    pub main_gid: String,
    pub emails_gid: String,
    pub timeout_seconds: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: constants::SPREADSHEET_ID.to_string(),
            main_gid: constants::MAIN_SHEET_GID.to_string(),
            emails_gid: constants::EMAILS_SHEET_GID.to_string(),
            timeout_seconds: 15,
        }
    }
}

impl SheetsConfig {
    pub fn main_url(&self) -> String {
        constants::sheet_csv_url(&self.spreadsheet_id, &self.main_gid)
    }

    pub fn emails_url(&self) -> String {
        constants::sheet_csv_url(&self.spreadsheet_id, &self.emails_gid)
    }
}

impl Config {
    /// Load from `DASHBOARD_CONFIG` (or `config.toml`), then apply env overrides.
    pub fn load() -> Result<Self> {
        Self::load_with(None)
    }

    /// Like [`Config::load`], but an explicit path takes precedence.
    pub fn load_with(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => std::env::var("DASHBOARD_CONFIG")
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
                .into(),
        };
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// A missing file yields the built-in defaults; a malformed one is an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("Config file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Ok(file) = std::env::var("GA_CREDENTIALS_FILE") {
            self.analytics.credentials_file = file;
        }
    }
}
