//! Google Calendar v3 provider

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use staybook_core::CalendarProvider;
use staybook_domain::constants::BOOKING_INFO_KEY;
use staybook_domain::utils::dates::start_of_day;
use staybook_domain::{
    Attendee, BookingEventMetadata, CalendarConfig, CalendarEvent, CalendarEventInput,
    EventWindow, Result, StaybookError,
};
use tracing::{debug, instrument, warn};
use url::Url;

use super::oauth::{OAuthCredentials, TokenSource};
use crate::http::HttpClient;

/// Calendar provider talking to the Google Calendar REST API.
pub struct GoogleCalendarProvider {
    http: HttpClient,
    api_base: Url,
    tokens: Arc<TokenSource>,
}

impl GoogleCalendarProvider {
    pub fn new(http: HttpClient, api_base: &str, tokens: Arc<TokenSource>) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| StaybookError::Config(format!("invalid calendar api_base '{api_base}': {e}")))?;
        if api_base.cannot_be_a_base() {
            return Err(StaybookError::Config(format!("calendar api_base '{api_base}' is not a base URL")));
        }
        Ok(Self { http, api_base, tokens })
    }

    /// Build the provider from config, failing when credentials are missing.
    pub fn from_config(config: &CalendarConfig, http: HttpClient) -> Result<Self> {
        let credentials = OAuthCredentials::from_config(config)?;
        let tokens = Arc::new(TokenSource::new(http.clone(), credentials));
        Self::new(http, &config.api_base, tokens)
    }

    fn events_url(&self, calendar_id: &str, event_id: Option<&str>) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["calendars", calendar_id, "events"]);
            if let Some(event_id) = event_id {
                segments.push(event_id);
            }
        }
        url
    }
}

#[async_trait]
impl CalendarProvider for GoogleCalendarProvider {
    #[instrument(skip(self, input), fields(summary = %input.summary))]
    async fn create_event(
        &self,
        calendar_id: &str,
        input: &CalendarEventInput,
    ) -> Result<CalendarEvent> {
        let body = GoogleEventBody::from_input(input)?;
        let token = self.tokens.access_token().await?;

        let request = self
            .http
            .request(Method::POST, self.events_url(calendar_id, None))
            .bearer_auth(token)
            .json(&body);
        let created: GoogleEvent = self.http.send_json(request).await?;

        debug!(event_id = %created.id, "calendar event created");
        Ok(created.into_domain())
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let request = self
            .http
            .request(Method::DELETE, self.events_url(calendar_id, Some(event_id)))
            .bearer_auth(token);

        // 404 and 410 both surface as NotFound via the status mapping.
        self.http.send_checked(request).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_events(
        &self,
        calendar_id: &str,
        window: &EventWindow,
    ) -> Result<Vec<CalendarEvent>> {
        let token = self.tokens.access_token().await?;

        let mut query: Vec<(&str, String)> = vec![
            ("maxResults", window.max_results.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];
        if let Some(min) = window.time_min {
            query.push(("timeMin", min.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(max) = window.time_max {
            query.push(("timeMax", max.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }

        let request = self
            .http
            .request(Method::GET, self.events_url(calendar_id, None))
            .bearer_auth(token)
            .query(&query);
        let listing: GoogleEventList = self.http.send_json(request).await?;

        Ok(listing.items.into_iter().map(GoogleEvent::into_domain).collect())
    }
}

// Wire format -----------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventBody {
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    start: GoogleEventTime,
    end: GoogleEventTime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attendees: Vec<GoogleAttendee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extended_properties: Option<ExtendedProperties>,
}

impl GoogleEventBody {
    fn from_input(input: &CalendarEventInput) -> Result<Self> {
        let extended_properties = input
            .booking_info
            .as_ref()
            .map(|info| {
                serde_json::to_string(info).map(|json| ExtendedProperties {
                    private: HashMap::from([(BOOKING_INFO_KEY.to_string(), json)]),
                })
            })
            .transpose()
            .map_err(|e| StaybookError::Internal(format!("encode booking metadata: {e}")))?;

        Ok(Self {
            summary: input.summary.clone(),
            description: input.description.clone(),
            start: GoogleEventTime::at(input.start, input.time_zone.clone()),
            end: GoogleEventTime::at(input.end, input.time_zone.clone()),
            attendees: input
                .attendee
                .iter()
                .map(|a| GoogleAttendee { email: a.email.clone(), display_name: a.display_name.clone() })
                .collect(),
            extended_properties,
        })
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_zone: Option<String>,
}

impl GoogleEventTime {
    fn at(instant: DateTime<Utc>, time_zone: Option<String>) -> Self {
        Self {
            date_time: Some(instant.to_rfc3339_opts(SecondsFormat::Secs, true)),
            date: None,
            time_zone,
        }
    }

    /// All-day events carry only `date`; those map to midnight UTC.
    fn instant(&self) -> Option<DateTime<Utc>> {
        if let Some(raw) = self.date_time.as_deref() {
            return DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc));
        }
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .map(start_of_day)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleAttendee {
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ExtendedProperties {
    #[serde(default)]
    private: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: GoogleEventTime,
    #[serde(default)]
    end: GoogleEventTime,
    #[serde(default)]
    attendees: Vec<GoogleAttendee>,
    #[serde(default)]
    html_link: Option<String>,
    #[serde(default)]
    extended_properties: Option<ExtendedProperties>,
}

impl GoogleEvent {
    fn into_domain(self) -> CalendarEvent {
        let booking_info = self
            .extended_properties
            .as_ref()
            .and_then(|props| props.private.get(BOOKING_INFO_KEY))
            .and_then(|raw| match serde_json::from_str::<BookingEventMetadata>(raw) {
                Ok(info) => Some(info),
                Err(err) => {
                    warn!(event_id = %self.id, error = %err, "ignoring unreadable booking metadata");
                    None
                }
            });

        CalendarEvent {
            start: self.start.instant(),
            end: self.end.instant(),
            attendees: self
                .attendees
                .into_iter()
                .filter(|a| !a.email.trim().is_empty())
                .map(|a| Attendee { email: a.email, display_name: a.display_name })
                .collect(),
            id: self.id,
            summary: self.summary.filter(|s| !s.trim().is_empty()),
            html_link: self.html_link,
            booking_info,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleEventList {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}
