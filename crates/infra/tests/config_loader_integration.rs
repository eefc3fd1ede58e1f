//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use staybook_domain::StaybookError;
use staybook_infra::config;
use tempfile::{Builder, NamedTempFile};

fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).expect("Failed to write to temp file");
    file
}

#[test]
fn test_load_config_from_json_file() {
    let file = config_file(
        ".json",
        r#"{
            "server": { "bind_addr": "127.0.0.1:8080" },
            "database": { "path": "/tmp/integration_test.db", "pool_size": 10 },
            "calendar": {
                "enabled": true,
                "calendar_id": "rentals@group.calendar.google.com",
                "client_id": "client",
                "client_secret": "secret",
                "refresh_token": "refresh"
            },
            "booking": { "cancellation_notice_hours": 24, "serialize_per_property": true }
        }"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from JSON file");

    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    assert_eq!(config.database.path, "/tmp/integration_test.db");
    assert_eq!(config.database.pool_size, 10);
    assert!(config.calendar.enabled);
    assert_eq!(config.calendar.calendar_id, "rentals@group.calendar.google.com");
    assert_eq!(config.calendar.refresh_token.as_deref(), Some("refresh"));
    assert_eq!(config.booking.cancellation_notice_hours, 24);
    assert!(config.booking.serialize_per_property);
}

#[test]
fn test_load_config_from_toml_file() {
    let file = config_file(
        ".toml",
        r#"
log_level = "debug"

[database]
path = "/tmp/integration_test_toml.db"
pool_size = 8

[properties]
base_url = "http://properties.internal:5001"
cache_ttl_seconds = 0

[http]
timeout_seconds = 5
max_attempts = 2
"#,
    );

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config from TOML file");

    assert_eq!(config.log_level, "debug");
    assert_eq!(config.database.path, "/tmp/integration_test_toml.db");
    assert_eq!(config.database.pool_size, 8);
    assert_eq!(config.properties.base_url, "http://properties.internal:5001");
    assert_eq!(config.properties.cache_ttl_seconds, 0);
    assert_eq!(config.http.timeout_seconds, 5);
    assert_eq!(config.http.max_attempts, 2);
}

#[test]
fn test_load_config_with_minimal_fields() {
    let file = config_file(".json", r#"{ "database": { "path": "minimal.db" } }"#);

    let config = config::load_from_file(Some(file.path().to_path_buf()))
        .expect("Failed to load config with minimal fields");

    assert_eq!(config.database.path, "minimal.db");
    assert_eq!(config.database.pool_size, 8);
    assert!(!config.calendar.enabled);
    assert_eq!(config.calendar.time_zone, "Europe/Paris");
    assert_eq!(config.booking.cancellation_notice_hours, 48);
    assert!(!config.booking.serialize_per_property);
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(StaybookError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let file = config_file(".json", r#"{ "this is": "not valid" "#);

    match config::load_from_file(Some(file.path().to_path_buf())) {
        Err(StaybookError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[test]
fn test_load_config_with_unsupported_extension() {
    let file = config_file(".yaml", "database:\n  path: x.db\n");

    let result = config::load_from_file(Some(file.path().to_path_buf()));
    assert!(matches!(result, Err(StaybookError::Config(ref m)) if m.contains("Unsupported")));
}
