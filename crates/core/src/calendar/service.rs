//! Calendar event service - validation and provider delegation

use std::sync::Arc;

use staybook_domain::constants::{DEFAULT_CALENDAR_ID, DEFAULT_EVENT_LIST_LIMIT, DEFAULT_TIME_ZONE};
use staybook_domain::{
    CalendarEvent, CalendarEventInput, EventWindow, Result, StaybookError,
};
use tracing::{debug, info};

use super::ports::CalendarProvider;

/// Google Calendar caps a single page at this many events.
const MAX_EVENT_LIST_LIMIT: u32 = 2500;

/// Calendar event service
pub struct CalendarEventService {
    provider: Arc<dyn CalendarProvider>,
    calendar_id: String,
    time_zone: String,
}

impl CalendarEventService {
    pub fn new(provider: Arc<dyn CalendarProvider>) -> Self {
        Self {
            provider,
            calendar_id: DEFAULT_CALENDAR_ID.to_string(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
        }
    }

    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = calendar_id.into();
        self
    }

    /// Time zone applied to events that do not name one.
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }

    /// Validate and create an event. Provider errors propagate.
    pub async fn create_event(&self, mut input: CalendarEventInput) -> Result<CalendarEvent> {
        if input.summary.trim().is_empty() {
            return Err(StaybookError::InvalidInput("summary is required".into()));
        }
        if input.start >= input.end {
            return Err(StaybookError::InvalidInput("event start must be before its end".into()));
        }
        if input.time_zone.as_deref().map_or(true, |tz| tz.trim().is_empty()) {
            input.time_zone = Some(self.time_zone.clone());
        }

        let event = self.provider.create_event(&self.calendar_id, &input).await?;
        info!(event_id = %event.id, calendar_id = %self.calendar_id, "Created calendar event");
        Ok(event)
    }

    /// Delete an event; one that is already gone counts as deleted.
    pub async fn delete_event(&self, event_id: &str) -> Result<()> {
        if event_id.trim().is_empty() {
            return Err(StaybookError::InvalidInput("event id is required".into()));
        }

        match self.provider.delete_event(&self.calendar_id, event_id).await {
            Ok(()) => {
                info!(event_id, "Deleted calendar event");
                Ok(())
            }
            Err(StaybookError::NotFound(_)) => {
                debug!(event_id, "Calendar event already absent");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn list_events(&self, mut window: EventWindow) -> Result<Vec<CalendarEvent>> {
        if let (Some(min), Some(max)) = (window.time_min, window.time_max) {
            if min > max {
                return Err(StaybookError::InvalidInput(
                    "startDate must be before endDate".into(),
                ));
            }
        }
        window.max_results = match window.max_results {
            0 => DEFAULT_EVENT_LIST_LIMIT,
            n => n.min(MAX_EVENT_LIST_LIMIT),
        };

        self.provider.list_events(&self.calendar_id, &window).await
    }
}
