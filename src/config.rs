//! Configuration module for the analytics router.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::Path;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

use crate::auth::ConfiguredApiKey;
use crate::domain::HandlerKind;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    /// Query handlers to register at startup.
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// API key authentication.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_keys: Vec<ConfiguredApiKey>,
}

/// Settings for the external analytics tooling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsConfig {
    /// Path of the analytics CLI executable, if one is deployed.
    #[serde(default)]
    pub cli_path: Option<String>,
}

impl AnalyticsConfig {
    /// Whether the configured analytics CLI exists on disk.
    pub fn cli_exists(&self) -> bool {
        self.cli_path
            .as_deref()
            .is_some_and(|path| Path::new(path).is_file())
    }
}

/// A query handler bound to one handler kind.
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerConfig {
    pub kind: HandlerKind,
    /// SQL statement, with `?1`, `?2`... for bound segments.
    pub query: String,
    /// Command segment indices bound as positional parameters, in order.
    #[serde(default)]
    pub bind: Vec<usize>,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ANALYTICS__*)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(false))
            // Layer on local overrides
            .add_source(File::with_name("config/local").required(false))
            // Layer on environment variables with ANALYTICS_ prefix
            .add_source(
                Environment::with_prefix("ANALYTICS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
