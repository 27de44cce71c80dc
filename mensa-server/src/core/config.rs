use std::path::PathBuf;
use std::time::Duration;

use crate::discount::DEFAULT_CACHE_TTL;
use crate::utils::AppError;
use crate::utils::logger::init_logger_with_file;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory for the database and logs |
/// | DATABASE_PATH | {WORK_DIR}/mensa.db | SQLite database file |
/// | DISCOUNT_CACHE_TTL_SECS | 300 | discount group cache lifetime |
/// | LOG_LEVEL | info | default log filter |
/// | LOG_DIR | (unset) | directory for daily rolling log files |
/// | LOG_JSON | false | emit logs as JSON (always on in production) |
/// | ENVIRONMENT | development | development, staging or production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/mensa DISCOUNT_CACHE_TTL_SECS=60 mensa groups list
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    /// Explicit database path; derived from `work_dir` when unset
    pub database_path: Option<String>,
    pub discount_cache_ttl_secs: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    pub environment: String,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            database_path: std::env::var("DATABASE_PATH").ok().filter(|p| !p.is_empty()),
            discount_cache_ttl_secs: std::env::var("DISCOUNT_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL.as_secs()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override the working directory and database path
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, database_path: Option<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = database_path;
        config
    }

    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("mensa.db"),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.discount_cache_ttl_secs)
    }

    /// Production always logs JSON
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Create the working directory if missing
    pub fn ensure_work_dir(&self) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.work_dir)
            .map_err(|e| AppError::config(format!("Cannot create work dir {}: {e}", self.work_dir)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> Result<Config, AppError> {
    // .env is optional
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    config.ensure_work_dir()?;

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| AppError::config(format!("Cannot create log dir {dir}: {e}")))?;
    }
    init_logger_with_file(
        Some(&config.log_level),
        Some(config.log_json || config.is_production()),
        config.log_dir.as_deref(),
    );

    tracing::debug!(
        work_dir = %config.work_dir,
        database = %config.database_path().display(),
        cache_ttl_secs = config.discount_cache_ttl_secs,
        environment = %config.environment,
        "Environment ready"
    );
    Ok(config)
}
