//! Calendar events mirrored into the external provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_EVENT_LIST_LIMIT;
use crate::utils::dates::flexible;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Booking details attached to a provider event as private metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEventMetadata {
    pub booking_id: String,
    pub property_id: String,
    pub property_name: String,
    pub guest_id: String,
    pub guest_name: String,
    #[serde(default)]
    pub guest_email: Option<String>,
    #[serde(with = "flexible")]
    pub check_in_date: DateTime<Utc>,
    #[serde(with = "flexible")]
    pub check_out_date: DateTime<Utc>,
}

/// Event to be created in the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventInput {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "flexible")]
    pub start: DateTime<Utc>,
    #[serde(with = "flexible")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub attendee: Option<Attendee>,
    #[serde(default)]
    pub booking_info: Option<BookingEventMetadata>,
}

/// Event as reported back by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    pub html_link: Option<String>,
    pub booking_info: Option<BookingEventMetadata>,
}

/// Time window and page size for event listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWindow {
    pub time_min: Option<DateTime<Utc>>,
    pub time_max: Option<DateTime<Utc>>,
    pub max_results: u32,
}

impl Default for EventWindow {
    fn default() -> Self {
        Self { time_min: None, time_max: None, max_results: DEFAULT_EVENT_LIST_LIMIT }
    }
}
