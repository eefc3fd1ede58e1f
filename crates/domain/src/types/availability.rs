//! Per-day availability overrides

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored override for one property on one day.
///
/// Unique per `(property_id, date)`. Days without a record are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub property_id: String,
    pub date: NaiveDate,
    pub is_available: bool,
    pub custom_price: Option<f64>,
    pub calendar_event_id: Option<String>,
    pub notes: Option<String>,
}

impl AvailabilityRecord {
    /// Record for `date` carrying the values of `patch`.
    pub fn from_patch(property_id: impl Into<String>, date: NaiveDate, patch: &AvailabilityPatch) -> Self {
        Self {
            property_id: property_id.into(),
            date,
            is_available: patch.is_available,
            custom_price: patch.custom_price,
            calendar_event_id: patch.calendar_event_id.clone(),
            notes: patch.notes.clone(),
        }
    }
}

/// Rendered availability of one day, as shown to the calendar UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub is_available: bool,
    pub custom_price: Option<f64>,
}

impl AvailabilityDay {
    /// A day with no stored override.
    pub fn open(date: NaiveDate) -> Self {
        Self { date, is_available: true, custom_price: None }
    }
}

impl From<&AvailabilityRecord> for AvailabilityDay {
    fn from(record: &AvailabilityRecord) -> Self {
        Self { date: record.date, is_available: record.is_available, custom_price: record.custom_price }
    }
}

/// Values written to every day of an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityPatch {
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub custom_price: Option<f64>,
    #[serde(default, alias = "googleCalendarEventId")]
    pub calendar_event_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Default for AvailabilityPatch {
    fn default() -> Self {
        Self { is_available: true, custom_price: None, calendar_event_id: None, notes: None }
    }
}

impl AvailabilityPatch {
    pub fn blocked() -> Self {
        Self { is_available: false, ..Self::default() }
    }
}

/// Single-day update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityUpdate {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub patch: AvailabilityPatch,
}

fn default_available() -> bool {
    true
}
