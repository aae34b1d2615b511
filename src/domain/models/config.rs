//! Configuration sections as loaded from YAML and the environment.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the enrichment service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Orchestration settings
    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    /// Enrichment cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Profile store client settings
    #[serde(default)]
    pub profile_source: ProfileSourceConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Orchestration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EnrichmentConfig {
    /// Tenants whose leaderboards are returned without enrichment
    #[serde(default)]
    pub disabled_tenants: Vec<String>,

    /// Per-tenant enrichment webhook base URLs; a tenant listed here is
    /// served by its webhook instead of the profile store
    #[serde(default)]
    pub webhook_urls: HashMap<String, String>,

    /// Webhook request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub webhook_timeout_ms: u64,
}

impl EnrichmentConfig {
    /// Webhook request timeout.
    pub const fn webhook_timeout(&self) -> Duration {
        Duration::from_millis(self.webhook_timeout_ms)
    }

    /// Webhook base URL for `tenant_id`, ignoring blank entries.
    pub fn webhook_url(&self, tenant_id: &str) -> Option<&str> {
        self.webhook_urls
            .get(tenant_id)
            .map(String::as_str)
            .filter(|url| !url.trim().is_empty())
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            disabled_tenants: Vec::new(),
            webhook_urls: HashMap::new(),
            webhook_timeout_ms: default_timeout_ms(),
        }
    }
}

/// Enrichment cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Use the in-process TTL cache; when false every call goes to the profile store
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Time to live for cached profiles, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached member profiles
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}

const fn default_max_capacity() -> u64 {
    100_000
}

impl CacheConfig {
    /// Time to live for cached profiles.
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            ttl_secs: default_ttl_secs(),
            max_capacity: default_max_capacity(),
        }
    }
}

/// Profile store client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProfileSourceConfig {
    /// Base URL of the profile store; a missing scheme defaults to http
    #[serde(default)]
    pub base_url: String,

    /// Path of the batch documents endpoint, relative to `base_url`
    #[serde(default = "default_documents_path")]
    pub documents_path: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_documents_path() -> String {
    "get-public-documents/wildlife-platform-player-profile".to_string()
}

const fn default_timeout_ms() -> u64 {
    500
}

impl ProfileSourceConfig {
    /// Profile store request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ProfileSourceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            documents_path: default_documents_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; console only when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Also write to stderr when `log_dir` is set
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_console: default_true(),
            rotation: default_rotation(),
        }
    }
}
