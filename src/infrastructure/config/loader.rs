//! Layered configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid cache ttl_secs: {0}. Must be at least 1")]
    InvalidCacheTtl(u64),

    #[error("Invalid cache max_capacity: {0}. Must be at least 1")]
    InvalidCacheCapacity(u64),

    #[error("Invalid profile source timeout_ms: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("No profile source configured: set profile_source.base_url or enrichment.webhook_urls")]
    NoProfileSource,

    #[error("Invalid enrichment webhook_timeout_ms: {0}. Must be at least 1")]
    InvalidWebhookTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Directory holding project configuration files.
pub const CONFIG_DIR: &str = ".lbenrich";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "LBENRICH_";

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .lbenrich/config.yaml (project config)
    /// 3. .lbenrich/local.yaml (local overrides, optional)
    /// 4. Environment variables (LBENRICH_* prefix, `__` for nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring env overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(format!("{CONFIG_DIR}/config.yaml")))
            .merge(Yaml::file(format!("{CONFIG_DIR}/local.yaml")))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    ///
    /// An empty profile source URL is accepted here; commands that call the
    /// profile store check it with [`ConfigLoader::require_profile_source`].
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Validate cache config
        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_secs));
        }

        if config.cache.max_capacity == 0 {
            return Err(ConfigError::InvalidCacheCapacity(config.cache.max_capacity));
        }

        // Validate profile source config
        if config.profile_source.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(config.profile_source.timeout_ms));
        }

        if config.profile_source.documents_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "profile_source documents_path cannot be empty".to_string(),
            ));
        }

        // Validate enrichment config
        if config
            .enrichment
            .disabled_tenants
            .iter()
            .any(|tenant| tenant.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed(
                "enrichment disabled_tenants cannot contain empty tenant ids".to_string(),
            ));
        }

        if config.enrichment.webhook_timeout_ms == 0 {
            return Err(ConfigError::InvalidWebhookTimeout(
                config.enrichment.webhook_timeout_ms,
            ));
        }

        if config
            .enrichment
            .webhook_urls
            .keys()
            .any(|tenant| tenant.trim().is_empty())
        {
            return Err(ConfigError::ValidationFailed(
                "enrichment webhook_urls cannot contain empty tenant ids".to_string(),
            ));
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }

    /// Check that at least one route to profile data is configured: the
    /// profile store or a tenant webhook
    pub fn require_profile_source(config: &Config) -> Result<(), ConfigError> {
        let has_store = !config.profile_source.base_url.trim().is_empty();
        let has_webhook = config
            .enrichment
            .webhook_urls
            .values()
            .any(|url| !url.trim().is_empty());

        if !has_store && !has_webhook {
            return Err(ConfigError::NoProfileSource);
        }
        Ok(())
    }
}
