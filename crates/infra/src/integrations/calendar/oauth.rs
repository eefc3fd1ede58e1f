//! Access tokens for the Google Calendar API.
//!
//! The service account flow is not used; a long-lived refresh token issued to
//! the platform account is exchanged for short-lived access tokens, which are
//! cached until shortly before they expire.

use std::time::{Duration, Instant};

use reqwest::Method;
use serde::Deserialize;
use staybook_domain::{CalendarConfig, Result, StaybookError};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::http::HttpClient;

/// Tokens are refreshed this long before the provider says they expire.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Credentials for the OAuth2 refresh-token grant.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl OAuthCredentials {
    /// Extract credentials from the calendar config section.
    pub fn from_config(config: &CalendarConfig) -> Result<Self> {
        fn required(value: &Option<String>, name: &str) -> Result<String> {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .ok_or_else(|| StaybookError::Config(format!("calendar {name} is not configured")))
        }

        Ok(Self {
            token_url: config.token_url.clone(),
            client_id: required(&config.client_id, "client_id")?,
            client_secret: required(&config.client_secret, "client_secret")?,
            refresh_token: required(&config.refresh_token, "refresh_token")?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Refresh-token backed access token cache.
pub struct TokenSource {
    http: HttpClient,
    credentials: OAuthCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    pub fn new(http: HttpClient, credentials: OAuthCredentials) -> Self {
        Self { http, credentials, cached: Mutex::new(None) }
    }

    /// Current access token, refreshing it when missing or about to expire.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.refresh().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }

    /// Drop the cached token so the next call performs a refresh.
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    #[instrument(skip(self), fields(token_url = %self.credentials.token_url))]
    async fn refresh(&self) -> Result<CachedToken> {
        let request = self.http.request(Method::POST, &self.credentials.token_url).form(&[
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ]);

        let response: TokenResponse = self.http.send_json(request).await.map_err(|err| match err {
            StaybookError::Auth(_) | StaybookError::InvalidInput(_) => {
                StaybookError::Auth(format!("calendar token refresh rejected: {}", err.message()))
            }
            other => other,
        })?;

        let lifetime = Duration::from_secs(response.expires_in.unwrap_or(3600));
        debug!(expires_in = lifetime.as_secs(), "refreshed calendar access token");

        Ok(CachedToken {
            value: response.access_token,
            refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }
}
