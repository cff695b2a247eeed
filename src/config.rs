//! Configuration for ethical-lens.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI on top of this)
//! 2. Environment variables (ETHICAL_LENS_ENDPOINT, ETHICAL_LENS_LANGUAGE)
//! 3. Config file (.ethical-lens/config.yaml)
//! 4. Defaults (http://localhost:8000/analyze, language "en")
//!
//! Config file discovery:
//! - Searches current directory and parents for .ethical-lens/config.yaml
//! - Falls back to <user config dir>/ethical-lens/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::ModePolicy;
use crate::domain::{TextHints, DEFAULT_LANGUAGE};

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub mode: Option<ModePolicy>,
    #[serde(default)]
    pub defaults: Option<DefaultsConfig>,
}

/// Pre-filled text request hints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    pub country: Option<String>,
    pub category: Option<String>,
    pub page_size: Option<u32>,
}

impl From<DefaultsConfig> for TextHints {
    fn from(d: DefaultsConfig) -> Self {
        Self {
            country: d.country,
            category: d.category,
            page_size: d.page_size.map(|n| n.to_string()),
        }
    }
}

/// Values read from the environment
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub endpoint: Option<String>,
    pub language: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("ETHICAL_LENS_ENDPOINT").ok(),
            language: std::env::var("ETHICAL_LENS_LANGUAGE").ok(),
        }
    }
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Analysis endpoint URL
    pub endpoint: String,
    /// Language hint sent with every request
    pub language: String,
    /// How the submission mode is chosen
    pub mode: ModePolicy,
    /// Hints pre-filled into text requests
    pub defaults: TextHints,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            mode: ModePolicy::default(),
            defaults: TextHints::default(),
            config_file: None,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".ethical-lens").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("ethical-lens").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Merge file and environment over defaults
fn resolve(file: Option<(PathBuf, ConfigFile)>, env: EnvOverrides) -> ResolvedConfig {
    let mut config = ResolvedConfig::default();

    if let Some((path, file)) = file {
        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        if let Some(language) = file.language {
            config.language = language;
        }
        if let Some(mode) = file.mode {
            config.mode = mode;
        }
        if let Some(defaults) = file.defaults {
            config.defaults = defaults.into();
        }
        config.config_file = Some(path);
    }

    if let Some(endpoint) = env.endpoint.filter(|s| !s.is_empty()) {
        config.endpoint = endpoint;
    }
    if let Some(language) = env.language.filter(|s| !s.is_empty()) {
        config.language = language;
    }

    config
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    Ok(resolve(file, EnvOverrides::from_env()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
