//! HTTP client for the properties service, fronted by a moka TTL cache.

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Method;
use serde::Deserialize;
use staybook_core::PropertyDirectory;
use staybook_domain::{PropertiesConfig, PropertySummary, Result, StaybookError};
use tracing::{debug, instrument};
use url::Url;

use crate::http::HttpClient;

const DEFAULT_MAX_CAPACITY: u64 = 1_000;

#[derive(Debug, Deserialize)]
struct PropertyEnvelope {
    data: RemoteProperty,
}

#[derive(Debug, Deserialize)]
struct RemoteProperty {
    #[serde(default, alias = "_id")]
    id: Option<String>,
    title: String,
}

/// Looks up property summaries over HTTP.
///
/// Only successful lookups are cached; misses and transport failures always
/// hit the service again.
pub struct HttpPropertyDirectory {
    http: HttpClient,
    base_url: Url,
    cache: Option<Cache<String, PropertySummary>>,
}

impl HttpPropertyDirectory {
    pub fn new(http: HttpClient, base_url: &str, cache_ttl: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            StaybookError::Config(format!("invalid properties base_url '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(StaybookError::Config(format!(
                "properties base_url '{base_url}' is not a base URL"
            )));
        }

        let cache = (!cache_ttl.is_zero()).then(|| {
            Cache::builder().max_capacity(DEFAULT_MAX_CAPACITY).time_to_live(cache_ttl).build()
        });

        Ok(Self { http, base_url, cache })
    }

    pub fn from_config(config: &PropertiesConfig, http: HttpClient) -> Result<Self> {
        Self::new(http, &config.base_url, Duration::from_secs(config.cache_ttl_seconds))
    }

    fn property_url(&self, property_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["api", "properties", property_id]);
        }
        url
    }

    async fn fetch(&self, property_id: &str) -> Result<PropertySummary> {
        let request = self.http.request(Method::GET, self.property_url(property_id));
        let envelope: PropertyEnvelope = self.http.send_json(request).await.map_err(|err| match err {
            StaybookError::NotFound(_) => {
                StaybookError::NotFound(format!("Property not found with id of {property_id}"))
            }
            other => other,
        })?;

        Ok(PropertySummary {
            id: envelope.data.id.unwrap_or_else(|| property_id.to_string()),
            title: envelope.data.title,
        })
    }
}

#[async_trait]
impl PropertyDirectory for HttpPropertyDirectory {
    #[instrument(skip(self))]
    async fn get_property(&self, property_id: &str) -> Result<PropertySummary> {
        let Some(cache) = &self.cache else {
            return self.fetch(property_id).await;
        };

        if let Some(hit) = cache.get(property_id).await {
            debug!("property cache hit");
            return Ok(hit);
        }

        let summary = self.fetch(property_id).await?;
        cache.insert(property_id.to_string(), summary.clone()).await;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn server_with_property() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/properties/p-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "data": { "_id": "p-1", "title": "Sea View Loft", "bedrooms": 2 }
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn cached_lookups_skip_the_service() {
        let server = server_with_property().await;
        let directory =
            HttpPropertyDirectory::new(HttpClient::new().unwrap(), &server.uri(), Duration::from_secs(60))
                .unwrap();

        for _ in 0..3 {
            let summary = directory.get_property("p-1").await.unwrap();
            assert_eq!(summary.title, "Sea View Loft");
        }
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_ttl_disables_the_cache() {
        let server = server_with_property().await;
        let directory =
            HttpPropertyDirectory::new(HttpClient::new().unwrap(), &server.uri(), Duration::ZERO)
                .unwrap();

        directory.get_property("p-1").await.unwrap();
        directory.get_property("p-1").await.unwrap();
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_property_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        let directory =
            HttpPropertyDirectory::new(HttpClient::new().unwrap(), &server.uri(), Duration::from_secs(60))
                .unwrap();

        let err = directory.get_property("missing").await.unwrap_err();
        assert_eq!(err, StaybookError::NotFound("Property not found with id of missing".into()));
    }
}
