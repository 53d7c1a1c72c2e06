//! Configuration Management
//!
//! Loads quiz configuration from TOML files.
//! Configuration includes:
//! - Where the statistics file lives
//! - Generation service settings (endpoint, model, timeouts, pacing)
//! - The category set used when asking the model for questions

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Smallest network timeout honored; a zero timeout would fail every request.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// File name looked up in the working directory when no `--config` is given.
pub const LOCAL_CONFIG_FILE: &str = "langquiz.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,

    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// When false the service is never probed and every mode plays from the bank
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Programming language the generated questions are about
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Pause after each successful generation
    #[serde(default = "default_request_pause")]
    pub request_pause_ms: u64,
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_file: default_stats_file(),
            generation: GenerationConfig::default(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
            model: default_model(),
            language: default_language(),
            probe_timeout_secs: default_probe_timeout(),
            request_timeout_secs: default_request_timeout(),
            request_pause_ms: default_request_pause(),
            categories: default_categories(),
        }
    }
}

impl GenerationConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_TIMEOUT_SECS))
    }

    pub fn request_pause(&self) -> Duration {
        Duration::from_millis(self.request_pause_ms)
    }
}

fn default_true() -> bool {
    true
}
fn default_stats_file() -> PathBuf {
    PathBuf::from("quiz_stats.json")
}
fn default_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}
fn default_model() -> String {
    "llama3.2".to_string()
}
fn default_language() -> String {
    "Rust".to_string()
}
fn default_probe_timeout() -> u64 {
    5
}
fn default_request_timeout() -> u64 {
    30
}
fn default_request_pause() -> u64 {
    1000
}
fn default_categories() -> Vec<String> {
    crate::source::prompt::DEFAULT_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `./langquiz.toml`
    /// and then `<config dir>/langquiz/config.toml` are tried, falling back to
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config from {}", p.display()))?;
                Self::from_toml_str(&content)
                    .with_context(|| format!("Failed to parse config {}", p.display()))
            }
            None => {
                for candidate in Self::default_paths() {
                    if let Ok(content) = std::fs::read_to_string(&candidate) {
                        tracing::debug!("Loading config from {}", candidate.display());
                        return Self::from_toml_str(&content).with_context(|| {
                            format!("Failed to parse config {}", candidate.display())
                        });
                    }
                }
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration")?;
        for (key, value) in [
            ("probe_timeout_secs", config.generation.probe_timeout_secs),
            ("request_timeout_secs", config.generation.request_timeout_secs),
        ] {
            if value < MIN_TIMEOUT_SECS {
                tracing::warn!("generation.{} = {} raised to {}s", key, value, MIN_TIMEOUT_SECS);
            }
        }
        Ok(config)
    }

    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("langquiz").join("config.toml"));
        }
        paths
    }
}
