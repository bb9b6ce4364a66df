//! Application configuration management.
//!
//! The engine's role registry, permission matrix, and workflow definitions
//! are compiled in; configuration covers the few knobs that vary per
//! deployment (token signing, impersonation policy, log filtering).

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Authorization engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Authorization engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Project roles allowed to hold a "view as" impersonation override.
    #[serde(default = "default_may_impersonate")]
    pub may_impersonate: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            may_impersonate: default_may_impersonate(),
        }
    }
}

fn default_may_impersonate() -> Vec<String> {
    vec!["supplier_pm".to_string()]
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Tracing env-filter directive.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load environment variables from .env file
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("WORKLANE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
