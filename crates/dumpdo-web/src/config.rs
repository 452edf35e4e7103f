//! Configuration loading for Dump.do.
//! Reads dumpdo.toml from the current directory or path in DUMPDO_CONFIG env var.
//! Secrets (API keys, auth token) come from the environment, never from the file.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini", "openai" or "anthropic".
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the provider API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_provider()     -> String { "gemini".to_string() }
fn default_model()        -> String { "gemini-2.0-flash".to_string() }
fn default_api_key_env()  -> String { "GEMINI_API_KEY".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_max_attempts() -> u32 { 3 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_rate_max")]
    pub rate_limit_max_requests: u32,
    #[serde(default = "default_rate_window")]
    pub rate_limit_window_secs: u64,
}

fn default_rate_max()    -> u32 { 20 }
fn default_rate_window() -> u64 { 60 }

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            rate_limit_max_requests: default_rate_max(),
            rate_limit_window_secs: default_rate_window(),
        }
    }
}

impl Config {
    /// Load configuration from dumpdo.toml.
    /// Checks DUMPDO_CONFIG env var first, then current directory.
    /// A missing file is not an error: every field has a default.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("DUMPDO_CONFIG").unwrap_or_else(|_| "dumpdo.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::info!(path, "no config file found, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Provider API key from the environment variable named in the config.
    pub fn api_key(&self) -> anyhow::Result<String> {
        std::env::var(&self.llm.api_key_env).map_err(|_| {
            anyhow::anyhow!("environment variable {} is not set", self.llm.api_key_env)
        })
    }
}
