mod support;

use axum::http::StatusCode;
use serde_json::json;
use support::{TestApp, ADMIN, ANONYMOUS};

#[tokio::test]
async fn availability_view_is_public_and_inclusive() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) = app
        .get("/api/calendar/availability/p-1?startDate=2025-06-01&endDate=2025-06-03", ANONYMOUS)
        .await;

    assert_eq!(status, StatusCode::OK);
    let days = body["data"].as_array().expect("days");
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"], "2025-06-01");
    assert_eq!(days[2]["date"], "2025-06-03");
    assert!(days.iter().all(|d| d["isAvailable"] == true));
}

#[tokio::test]
async fn availability_view_requires_both_dates() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) =
        app.get("/api/calendar/availability/p-1?startDate=2025-06-01", ANONYMOUS).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide start and end dates");
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, _) = app
        .get("/api/calendar/availability/p-1?startDate=2025-06-05&endDate=2025-06-01", ANONYMOUS)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_day_update_is_reflected_in_view() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) = app
        .post(
            "/api/calendar/availability/p-1",
            ADMIN,
            json!({ "date": "2025-06-02", "isAvailable": false, "customPrice": 99.5, "notes": "owner stay" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["date"], "2025-06-02");
    assert_eq!(body["data"]["isAvailable"], false);
    assert_eq!(body["data"]["notes"], "owner stay");

    let (_, body) = app
        .get("/api/calendar/availability/p-1?startDate=2025-06-01&endDate=2025-06-03", ANONYMOUS)
        .await;
    let days = body["data"].as_array().expect("days");
    assert_eq!(days[0]["isAvailable"], true);
    assert_eq!(days[1]["isAvailable"], false);
    assert_eq!(days[1]["customPrice"], 99.5);
    assert_eq!(days[2]["isAvailable"], true);
}

#[tokio::test]
async fn range_update_writes_every_day() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) = app
        .post(
            "/api/calendar/availability/p-1",
            ADMIN,
            json!({ "startDate": "2025-06-01", "endDate": "2025-06-05", "customPrice": 140.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["days"], 5);
    assert_eq!(body["message"], "Updated availability for 5 days");

    let (_, body) = app
        .get("/api/calendar/availability/p-1?startDate=2025-06-01&endDate=2025-06-05", ANONYMOUS)
        .await;
    let days = body["data"].as_array().expect("days");
    assert!(days.iter().all(|d| d["customPrice"] == 140.0 && d["isAvailable"] == true));
}

#[tokio::test]
async fn update_needs_a_date_or_range() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) = app
        .post("/api/calendar/availability/p-1", ADMIN, json!({ "isAvailable": false }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide a date or a date range");
}

#[tokio::test]
async fn updates_require_identity() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, _) = app
        .post("/api/calendar/availability/p-1", ANONYMOUS, json!({ "date": "2025-06-02" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bulk_update_blocks_range() {
    let app = TestApp::with_calendar_disabled().await;

    let (status, body) = app
        .post(
            "/api/calendar/availability/p-1/bulk",
            ADMIN,
            json!({ "startDate": "2025-06-10", "endDate": "2025-06-11", "isAvailable": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["days"], 2);

    let (status, _) = app
        .post("/api/calendar/availability/p-1/bulk", ADMIN, json!({ "date": "2025-06-10" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = app
        .get("/api/calendar/availability/p-1?startDate=2025-06-09&endDate=2025-06-12", ANONYMOUS)
        .await;
    let flags: Vec<bool> = body["data"]
        .as_array()
        .expect("days")
        .iter()
        .map(|d| d["isAvailable"].as_bool().unwrap_or_default())
        .collect();
    assert_eq!(flags, vec![true, false, false, true]);
}
