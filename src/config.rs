use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding the RapidAPI key
pub const API_KEY_ENV: &str = "GEO_API_KEY";
/// Environment variable holding the RapidAPI host (e.g. `wft-geo-db.p.rapidapi.com`)
pub const API_HOST_ENV: &str = "GEO_API_HOST";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub suggestions: SuggestionsConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub key: String,
    pub host: String,
    /// Origin override; empty = `https://<host>`
    pub base_url: String,
    /// Maximum number of cities per lookup
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SuggestionsConfig {
    /// Inputs shorter than this (in characters) never hit the API
    pub min_query_len: usize,
    /// Maximum number of cached queries; 0 = unbounded
    pub cache_capacity: usize,
    /// Ignore responses superseded by a newer keystroke
    pub discard_stale: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            host: String::new(),
            base_url: String::new(),
            limit: 10,
        }
    }
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            min_query_len: 2,
            cache_capacity: 0,
            discard_stale: true,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 360.0,
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> String {
        if self.base_url.is_empty() {
            format!("https://{}", self.host)
        } else {
            self.base_url.clone()
        }
    }
}

impl Config {
    /// Overlay API credentials from the environment. Values are taken as-is;
    /// missing ones are only warned about.
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var(API_KEY_ENV) {
            self.api.key = key;
        }
        if let Some(host) = var(API_HOST_ENV) {
            self.api.host = host;
        }

        if self.api.key.is_empty() {
            tracing::warn!("{} is not set; lookups will return no cities", API_KEY_ENV);
        }
        if self.api.host.is_empty() {
            tracing::warn!("{} is not set; lookups will return no cities", API_HOST_ENV);
        }
    }
}

/// Load the config file (or defaults) and overlay the environment.
pub fn load() -> Config {
    let mut config = load_file(&config_path());
    config.apply_env(|name| std::env::var(name).ok());
    config
}

pub fn load_file(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

fn config_path() -> PathBuf {
    // ~/.config/ (XDG convention) on every platform
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("cityfill")
        .join("config.toml")
}
