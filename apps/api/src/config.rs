use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub db_max_connections: u32,
    pub port: u16,
    pub cv_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
        };

        Ok(Config {
            db_host: require("DB_HOST")?,
            db_port: parse_or(&lookup, "DB_PORT", 5432)?,
            db_name: require("DB_NAME")?,
            db_user: require("DB_USER")?,
            db_password: lookup("DB_PASSWORD").unwrap_or_default(),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            port: parse_or(&lookup, "PORT", 4000)?,
            cv_dir: lookup("CV_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(std::env::temp_dir),
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 15)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
