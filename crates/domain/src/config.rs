//! Configuration structures
//!
//! Every section has a `Default` so that partial config files only need to
//! name the values they override.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CALENDAR_ID, DEFAULT_CANCELLATION_NOTICE_HOURS, DEFAULT_PROPERTY_CACHE_TTL_SECS,
    DEFAULT_TIME_ZONE,
};

/// Root application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub calendar: CalendarConfig,
    pub properties: PropertiesConfig,
    pub booking: BookingPolicyConfig,
    pub http: HttpConfig,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            calendar: CalendarConfig::default(),
            properties: PropertiesConfig::default(),
            booking: BookingPolicyConfig::default(),
            http: HttpConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "0.0.0.0:5003".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "staybook.db".to_string(), pool_size: 8 }
    }
}

/// Google Calendar access
///
/// `api_base` and `token_url` are configurable so the adapter can be pointed
/// at a local stub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub enabled: bool,
    pub api_base: String,
    pub token_url: String,
    pub calendar_id: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub time_zone: String,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_base: "https://www.googleapis.com/calendar/v3".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            client_id: None,
            client_secret: None,
            refresh_token: None,
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertiesConfig {
    pub base_url: String,
    /// Summary cache lifetime; `0` disables caching.
    pub cache_ttl_seconds: u64,
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            cache_ttl_seconds: DEFAULT_PROPERTY_CACHE_TTL_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingPolicyConfig {
    pub cancellation_notice_hours: i64,
    /// Serialize check-and-persist per property and reject windows that
    /// overlap an active booking. Off by default.
    pub serialize_per_property: bool,
}

impl Default for BookingPolicyConfig {
    fn default() -> Self {
        Self {
            cancellation_notice_hours: DEFAULT_CANCELLATION_NOTICE_HOURS,
            serialize_per_property: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub max_attempts: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30, max_attempts: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "booking": { "serialize_per_property": true } }"#).unwrap();

        assert!(config.booking.serialize_per_property);
        assert_eq!(config.booking.cancellation_notice_hours, 48);
        assert_eq!(config.calendar.calendar_id, "primary");
        assert_eq!(config.log_level, "info");
    }
}
