//! Shared harness for router-level tests.
//!
//! Each [`TestApp`] owns a temporary SQLite database and a wiremock server
//! standing in for both Google Calendar and the properties service.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use serde_json::Value;
use staybook_api::{router, AppContext};
use staybook_core::FixedClock;
use staybook_domain::{CalendarConfig, Config, DatabaseConfig, HttpConfig, PropertiesConfig};
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const GUEST: &[(&str, &str)] = &[
    ("x-user-id", "user-1"),
    ("x-user-email", "ada@example.com"),
    ("x-user-first-name", "Ada"),
    ("x-user-last-name", "Lovelace"),
];
pub const OTHER_GUEST: &[(&str, &str)] = &[("x-user-id", "user-2")];
pub const ADMIN: &[(&str, &str)] = &[("x-user-id", "admin-1"), ("x-user-role", "admin")];
pub const ANONYMOUS: &[(&str, &str)] = &[];

pub struct TestApp {
    pub router: Router,
    pub server: MockServer,
    pub clock: FixedClock,
    pub context: Arc<AppContext>,
    _temp_dir: TempDir,
}

impl TestApp {
    /// App with calendar mirroring enabled against the stub server.
    pub async fn new() -> Self {
        Self::build(true, false).await
    }

    pub async fn with_calendar_disabled() -> Self {
        Self::build(false, false).await
    }

    pub async fn serialized() -> Self {
        Self::build(true, true).await
    }

    async fn build(calendar_enabled: bool, serialize: bool) -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let server = MockServer::start().await;
        mount_defaults(&server).await;

        let mut config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("staybook.db").display().to_string(),
                pool_size: 4,
            },
            calendar: CalendarConfig {
                enabled: calendar_enabled,
                api_base: server.uri(),
                token_url: format!("{}/token", server.uri()),
                client_id: Some("client-id".into()),
                client_secret: Some("client-secret".into()),
                refresh_token: Some("refresh-token".into()),
                ..CalendarConfig::default()
            },
            properties: PropertiesConfig { base_url: server.uri(), cache_ttl_seconds: 60 },
            http: HttpConfig { timeout_seconds: 5, max_attempts: 1 },
            ..Config::default()
        };
        config.booking.serialize_per_property = serialize;

        let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap());
        let context = Arc::new(
            AppContext::with_clock(config, Arc::new(clock.clone())).expect("context should wire"),
        );

        Self { router: router(Arc::clone(&context)), server, clock, context, _temp_dir: temp_dir }
    }

    /// Send a request through the router and decode the JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        identity: &[(&str, &str)],
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in identity {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    pub async fn get(&self, uri: &str, identity: &[(&str, &str)]) -> (StatusCode, Value) {
        self.send(Method::GET, uri, identity, None).await
    }

    pub async fn post(&self, uri: &str, identity: &[(&str, &str)], body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, identity, Some(body)).await
    }

    pub async fn put(&self, uri: &str, identity: &[(&str, &str)], body: Option<Value>) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, identity, body).await
    }

    /// Accept every event creation, answering with `event_id`.
    pub async fn accept_events(&self, event_id: &str) {
        Mock::given(method("POST"))
            .and(path("/calendars/primary/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": event_id })),
            )
            .mount(&self.server)
            .await;
    }

    /// Create a booking as the guest and return its id.
    pub async fn book(&self, check_in: &str, check_out: &str) -> String {
        let (status, body) =
            self.post("/api/bookings", GUEST, booking_body(check_in, check_out)).await;
        assert_eq!(status, StatusCode::CREATED, "booking failed: {body}");
        body["data"]["id"].as_str().expect("booking id").to_string()
    }
}

pub fn booking_body(check_in: &str, check_out: &str) -> Value {
    serde_json::json!({
        "propertyId": "p-1",
        "checkInDate": check_in,
        "checkOutDate": check_out,
        "guestsCount": 2,
        "totalPrice": 450.0
    })
}

async fn mount_defaults(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "ya29.test",
            "expires_in": 3599
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/properties/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "_id": "p-1", "title": "Sea View Loft" }
        })))
        .mount(server)
        .await;
}
