//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `STAYBOOK_DB_PATH` is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `STAYBOOK_DB_PATH`: Database file path (required for env loading)
//! - `STAYBOOK_DB_POOL_SIZE`: Connection pool size
//! - `STAYBOOK_BIND_ADDR`: HTTP listen address
//! - `STAYBOOK_CALENDAR_ENABLED`: Mirror bookings to Google Calendar (true/false)
//! - `STAYBOOK_CALENDAR_ID`: Target calendar id
//! - `STAYBOOK_CALENDAR_API_BASE`, `STAYBOOK_CALENDAR_TOKEN_URL`: Google endpoints
//! - `STAYBOOK_CALENDAR_TIME_ZONE`: Time zone for created events
//! - `STAYBOOK_GOOGLE_CLIENT_ID`, `STAYBOOK_GOOGLE_CLIENT_SECRET`,
//!   `STAYBOOK_GOOGLE_REFRESH_TOKEN`: OAuth credentials
//! - `STAYBOOK_PROPERTIES_URL`: Base URL of the properties service
//! - `STAYBOOK_PROPERTY_CACHE_TTL`: Property summary cache lifetime in seconds
//! - `STAYBOOK_CANCELLATION_NOTICE_HOURS`: Minimum notice for non-admin cancellation
//! - `STAYBOOK_SERIALIZE_PER_PROPERTY`: Serialize booking writes per property
//! - `STAYBOOK_HTTP_TIMEOUT`: Outbound request timeout in seconds
//! - `STAYBOOK_HTTP_MAX_ATTEMPTS`: Outbound request attempts
//! - `STAYBOOK_LOG_LEVEL`: Default log filter
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./staybook.json` or `./staybook.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use staybook_domain::{
    BookingPolicyConfig, CalendarConfig, Config, DatabaseConfig, HttpConfig, PropertiesConfig,
    Result, ServerConfig, StaybookError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the database path
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `StaybookError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - An environment variable has an invalid value
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Like [`load`], but starts from built-in defaults when no source exists.
pub fn load_or_default() -> Config {
    load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "No usable configuration found, using defaults");
        Config::default()
    })
}

/// Load configuration from environment variables
///
/// Only `STAYBOOK_DB_PATH` is required; every other value falls back to its
/// default.
///
/// # Errors
/// Returns `StaybookError::Config` if the required variable is missing or a
/// numeric variable cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();
    let db_path = env_var("STAYBOOK_DB_PATH")?;

    let calendar = CalendarConfig {
        enabled: env_bool("STAYBOOK_CALENDAR_ENABLED", defaults.calendar.enabled),
        api_base: env_or("STAYBOOK_CALENDAR_API_BASE", defaults.calendar.api_base),
        token_url: env_or("STAYBOOK_CALENDAR_TOKEN_URL", defaults.calendar.token_url),
        calendar_id: env_or("STAYBOOK_CALENDAR_ID", defaults.calendar.calendar_id),
        client_id: std::env::var("STAYBOOK_GOOGLE_CLIENT_ID").ok(),
        client_secret: std::env::var("STAYBOOK_GOOGLE_CLIENT_SECRET").ok(),
        refresh_token: std::env::var("STAYBOOK_GOOGLE_REFRESH_TOKEN").ok(),
        time_zone: env_or("STAYBOOK_CALENDAR_TIME_ZONE", defaults.calendar.time_zone),
    };

    Ok(Config {
        server: ServerConfig { bind_addr: env_or("STAYBOOK_BIND_ADDR", defaults.server.bind_addr) },
        database: DatabaseConfig {
            path: db_path,
            pool_size: env_parse("STAYBOOK_DB_POOL_SIZE", defaults.database.pool_size)?,
        },
        calendar,
        properties: PropertiesConfig {
            base_url: env_or("STAYBOOK_PROPERTIES_URL", defaults.properties.base_url),
            cache_ttl_seconds: env_parse(
                "STAYBOOK_PROPERTY_CACHE_TTL",
                defaults.properties.cache_ttl_seconds,
            )?,
        },
        booking: BookingPolicyConfig {
            cancellation_notice_hours: env_parse(
                "STAYBOOK_CANCELLATION_NOTICE_HOURS",
                defaults.booking.cancellation_notice_hours,
            )?,
            serialize_per_property: env_bool(
                "STAYBOOK_SERIALIZE_PER_PROPERTY",
                defaults.booking.serialize_per_property,
            ),
        },
        http: HttpConfig {
            timeout_seconds: env_parse("STAYBOOK_HTTP_TIMEOUT", defaults.http.timeout_seconds)?,
            max_attempts: env_parse("STAYBOOK_HTTP_MAX_ATTEMPTS", defaults.http.max_attempts)?,
        },
        log_level: env_or("STAYBOOK_LOG_LEVEL", defaults.log_level),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `StaybookError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StaybookError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StaybookError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StaybookError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StaybookError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StaybookError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(StaybookError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 6] = [
        "config.json",
        "config.toml",
        "staybook.json",
        "staybook.toml",
        "../config.json",
        "../config.toml",
    ];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        StaybookError::Config(format!("Missing required environment variable: {}", key))
    })
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty()).unwrap_or(default)
}

/// Parse an optional environment variable, rejecting malformed values.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| StaybookError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
