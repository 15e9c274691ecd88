//! Configuration module for the album store.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Storage key under which the album record is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "album_data";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite file backing the persistence adapter
    pub db_path: PathBuf,
    /// Key under which the single album record is stored
    pub storage_key: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("ALBUM_DB_PATH")
            .unwrap_or_else(|_| "./data/album.sqlite".to_string())
            .into();

        let storage_key =
            env::var("ALBUM_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        let log_level = env::var("ALBUM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            storage_key,
            log_level,
        }
    }
}
