//! Mock calendar provider and property directory

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use staybook_core::{CalendarProvider, PropertyDirectory};
use staybook_domain::{
    CalendarEvent, CalendarEventInput, EventWindow, PropertySummary, Result as DomainResult,
    StaybookError,
};

/// In-memory mock for `CalendarProvider`.
///
/// Remembers every created event and every delete request.
#[derive(Default, Clone)]
pub struct MockCalendarProvider {
    created: Arc<Mutex<Vec<(String, CalendarEventInput)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicUsize>,
    fail_create: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
    missing_on_delete: Arc<AtomicBool>,
}

impl MockCalendarProvider {
    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Deletes report the event as already gone.
    pub fn missing_on_delete(&self, missing: bool) {
        self.missing_on_delete.store(missing, Ordering::SeqCst);
    }

    pub fn created(&self) -> Vec<(String, CalendarEventInput)> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalendarProvider for MockCalendarProvider {
    async fn create_event(
        &self,
        calendar_id: &str,
        input: &CalendarEventInput,
    ) -> DomainResult<CalendarEvent> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StaybookError::Network("calendar unreachable".into()));
        }

        let id = format!("evt-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.created.lock().unwrap().push((calendar_id.to_string(), input.clone()));

        Ok(CalendarEvent {
            id,
            summary: Some(input.summary.clone()),
            start: Some(input.start),
            end: Some(input.end),
            attendees: input.attendee.clone().into_iter().collect(),
            html_link: None,
            booking_info: input.booking_info.clone(),
        })
    }

    async fn delete_event(&self, _calendar_id: &str, event_id: &str) -> DomainResult<()> {
        self.deleted.lock().unwrap().push(event_id.to_string());
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StaybookError::Network("calendar unreachable".into()));
        }
        if self.missing_on_delete.load(Ordering::SeqCst) {
            return Err(StaybookError::NotFound(format!("event {event_id}")));
        }
        Ok(())
    }

    async fn list_events(
        &self,
        _calendar_id: &str,
        window: &EventWindow,
    ) -> DomainResult<Vec<CalendarEvent>> {
        Ok(self
            .created()
            .into_iter()
            .enumerate()
            .map(|(i, (_, input))| CalendarEvent {
                id: format!("evt-{}", i + 1),
                summary: Some(input.summary),
                start: Some(input.start),
                end: Some(input.end),
                attendees: Vec::new(),
                html_link: None,
                booking_info: input.booking_info,
            })
            .take(window.max_results as usize)
            .collect())
    }
}

/// In-memory mock for `PropertyDirectory`.
#[derive(Default, Clone)]
pub struct MockPropertyDirectory {
    properties: Arc<Mutex<HashMap<String, String>>>,
}

impl MockPropertyDirectory {
    pub fn with_property(self, id: &str, title: &str) -> Self {
        self.properties.lock().unwrap().insert(id.to_string(), title.to_string());
        self
    }

    pub fn remove(&self, id: &str) {
        self.properties.lock().unwrap().remove(id);
    }
}

#[async_trait]
impl PropertyDirectory for MockPropertyDirectory {
    async fn get_property(&self, property_id: &str) -> DomainResult<PropertySummary> {
        self.properties
            .lock()
            .unwrap()
            .get(property_id)
            .map(|title| PropertySummary { id: property_id.to_string(), title: title.clone() })
            .ok_or_else(|| StaybookError::NotFound(format!("property {property_id}")))
    }
}
