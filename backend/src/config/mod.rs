//! Configuration management for the Diet Planner backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FA__)
//! 4. Conventional variables (`DATABASE_URL`, `GOOGLE_API_KEY`) when the
//!    layered value is unset

use anyhow::Result;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable holding the Gemini credential
pub const GOOGLE_API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable holding the database connection string
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Application configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty or `*` allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string; persistence is disabled when unset
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

/// AI/LLM configuration
#[derive(Debug, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key; AI generation is disabled when unset
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-pro-latest".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_origins: Vec::new(),
                request_timeout_secs: 90,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                run_migrations: true,
            },
            ai: AiConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FA__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(&config_file)
                    .required(false)
            )
            // Override with environment variables (FA__ prefix)
            // e.g., FA__SERVER__PORT=9000 sets server.port
            .add_source(
                config::Environment::with_prefix("FA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true)
            )
            .build()?;

        let mut config: AppConfig = config.try_deserialize()?;
        config.apply_conventional_env(|key| env::var(key).ok());
        Ok(config)
    }

    /// Fill unset credentials from conventional variable names
    pub fn apply_conventional_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.database.url.is_none() {
            self.database.url = non_empty(DATABASE_URL_ENV);
        }
        if self.ai.api_key.is_none() {
            self.ai.api_key = non_empty(GOOGLE_API_KEY_ENV).map(SecretString::new);
        }
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
