//! Application configuration.
//!
//! Every setting resolves with priority: `config.toml` > environment
//! (including `.env`) > default.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Content root used when nothing else is configured
pub const DEFAULT_CONTENT_DIR: &str = "content";

/// Progress database used when nothing else is configured
pub const DEFAULT_DATABASE_PATH: &str = "data/progress.db";

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct AppConfig {
    content: Option<ContentConfig>,
    database: Option<DatabaseConfig>,
    server: Option<ServerConfig>,
}

#[derive(Debug, Deserialize)]
struct ContentConfig {
    dir: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ServerConfig {
    port: Option<u16>,
}

/// Resolved settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub content_dir: PathBuf,
    pub database_path: PathBuf,
    pub port: u16,
}

impl Settings {
    /// Get the full server bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", SERVER_ADDR, self.port)
    }
}

/// Load settings from `config.toml`, `.env` and the process environment.
pub fn load() -> Settings {
    // Load .env file if present
    let _ = dotenvy::dotenv();
    load_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Load settings from an explicit config file and environment lookup.
pub fn load_from(config_file: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let config = match std::fs::read_to_string(config_file) {
        Ok(contents) => match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid {}: {}", config_file.display(), e);
                AppConfig::default()
            }
        },
        Err(_) => AppConfig::default(),
    };
    resolve(config, env)
}

fn resolve(config: AppConfig, env: impl Fn(&str) -> Option<String>) -> Settings {
    let content_dir = pick(
        "content directory",
        config.content.and_then(|c| c.dir),
        env("CONTENT_DIR"),
        DEFAULT_CONTENT_DIR.to_string(),
    );
    let database_path = pick(
        "database",
        config.database.and_then(|d| d.path),
        env("DATABASE_PATH"),
        DEFAULT_DATABASE_PATH.to_string(),
    );

    let env_port = env("PORT").and_then(|value| match value.parse::<u16>() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!("Ignoring invalid PORT value: {}", value);
            None
        }
    });
    let port = pick(
        "port",
        config.server.and_then(|s| s.port),
        env_port,
        SERVER_PORT,
    );

    Settings {
        content_dir: PathBuf::from(content_dir),
        database_path: PathBuf::from(database_path),
        port,
    }
}

fn pick<T: std::fmt::Display>(what: &str, file: Option<T>, env: Option<T>, default: T) -> T {
    if let Some(value) = file {
        tracing::info!("Using {} from {}: {}", what, CONFIG_FILE, value);
        return value;
    }
    if let Some(value) = env {
        tracing::info!("Using {} from environment: {}", what, value);
        return value;
    }
    tracing::info!("Using default {}: {}", what, default);
    default
}
