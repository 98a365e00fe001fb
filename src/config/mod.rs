mod parser;

use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_HOST, DEFAULT_POOL_SIZE, DEFAULT_PORT};
use serde::{Deserialize, Serialize};

pub use parser::{load_app_config, resolve_config};

/// Main configuration structure of the service
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    #[serde(default = "default_database_path")]
    pub path: String,
    /// Maximum number of pooled connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Whether missing tables are created at startup
    #[serde(default = "default_true")]
    pub bootstrap_schema: bool,
    /// Optional YAML file of trips to insert at startup
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: default_database_path(),
            pool_size: default_pool_size(),
            bootstrap_schema: true,
            seed_file: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "tripdesk=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Whether to also write to a daily rotating file
    #[serde(default)]
    pub file: bool,
    /// Directory of the rotating log files
    #[serde(default = "default_log_directory")]
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            file: false,
            directory: default_log_directory(),
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_POOL_SIZE
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}
