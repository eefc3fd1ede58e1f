//! Calendar provider port interfaces

use async_trait::async_trait;
use staybook_domain::{CalendarEvent, CalendarEventInput, EventWindow, Result};

/// Trait for the external calendar holding mirrored bookings
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Create an event and return it as stored by the provider.
    async fn create_event(
        &self,
        calendar_id: &str,
        input: &CalendarEventInput,
    ) -> Result<CalendarEvent>;

    /// Delete an event. A missing event yields `StaybookError::NotFound`.
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()>;

    /// Events inside `window`, ordered by start time.
    async fn list_events(&self, calendar_id: &str, window: &EventWindow)
        -> Result<Vec<CalendarEvent>>;
}
