//! Stand-in provider used when calendar mirroring is switched off.

use async_trait::async_trait;
use staybook_core::CalendarProvider;
use staybook_domain::{CalendarEvent, CalendarEventInput, EventWindow, Result, StaybookError};

/// Provider that rejects every call with a configuration error.
///
/// Booking creation and cancellation treat calendar failures as non-fatal, so
/// running with this provider still books and cancels; only the calendar
/// endpoints report the error to callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledCalendarProvider;

fn disabled() -> StaybookError {
    StaybookError::Config("calendar integration is disabled".into())
}

#[async_trait]
impl CalendarProvider for DisabledCalendarProvider {
    async fn create_event(&self, _: &str, _: &CalendarEventInput) -> Result<CalendarEvent> {
        Err(disabled())
    }

    async fn delete_event(&self, _: &str, _: &str) -> Result<()> {
        Err(disabled())
    }

    async fn list_events(&self, _: &str, _: &EventWindow) -> Result<Vec<CalendarEvent>> {
        Err(disabled())
    }
}
