//! Calendar provider adapters

mod disabled;
mod google;
mod oauth;

use std::sync::Arc;

use staybook_core::CalendarProvider;
use staybook_domain::{CalendarConfig, Result};
use tracing::info;

pub use disabled::DisabledCalendarProvider;
pub use google::GoogleCalendarProvider;
pub use oauth::{OAuthCredentials, TokenSource};

use crate::http::HttpClient;

/// Pick the provider the config asks for.
pub fn build_provider(config: &CalendarConfig, http: HttpClient) -> Result<Arc<dyn CalendarProvider>> {
    if !config.enabled {
        info!("calendar mirroring disabled");
        return Ok(Arc::new(DisabledCalendarProvider));
    }

    let provider = GoogleCalendarProvider::from_config(config, http)?;
    info!(api_base = %config.api_base, calendar_id = %config.calendar_id, "google calendar provider ready");
    Ok(Arc::new(provider))
}
