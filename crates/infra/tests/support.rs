//! Shared helpers for `staybook-infra` integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use staybook_infra::database::DbManager;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "ya29.test-token";

/// Temporary database wrapper that keeps the underlying file alive for the
/// duration of a test run.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    /// Create a new temporary database with the schema applied.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let db_path = temp_dir.path().join("test.db");

        let manager = DbManager::new(&db_path, 4).expect("db manager should be created");
        manager.run_migrations().expect("schema should apply");

        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    /// Execute a batch of SQL statements against the database.
    pub fn execute_batch(&self, sql: &str) {
        let conn = self
            .manager
            .get_connection()
            .expect("connection should be available for execute_batch");
        conn.execute_batch(sql).expect("SQL batch execution should succeed");
    }
}

impl Default for TestDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Route test logs through the libtest writer once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("staybook=debug,staybook_infra=debug,staybook_core=debug")
            .with_test_writer()
            .try_init();
    });
}

/// Mount an OAuth token endpoint at `/token` that always hands out
/// [`ACCESS_TOKEN`].
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

/// Calendar config pointing both Google endpoints at `server`.
pub fn calendar_config(server: &MockServer) -> staybook_domain::CalendarConfig {
    staybook_domain::CalendarConfig {
        enabled: true,
        api_base: server.uri(),
        token_url: format!("{}/token", server.uri()),
        calendar_id: "primary".into(),
        client_id: Some("client-id".into()),
        client_secret: Some("client-secret".into()),
        refresh_token: Some("refresh-token".into()),
        ..staybook_domain::CalendarConfig::default()
    }
}
