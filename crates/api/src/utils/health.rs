//! Health report served by `GET /health`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Overall health of the service.
///
/// The service is healthy when every critical component is healthy;
/// non-critical components only lower the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Healthy components over total components, 1.0 when there are none.
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp (seconds) of the check.
    pub timestamp: i64,
}

impl HealthStatus {
    pub fn from_components(components: Vec<ComponentHealth>) -> Self {
        let score = if components.is_empty() {
            1.0
        } else {
            components.iter().filter(|c| c.is_healthy).count() as f64 / components.len() as f64
        };
        let is_healthy = components.iter().filter(|c| c.critical).all(|c| c.is_healthy);

        Self { is_healthy, score, components, timestamp: Utc::now().timestamp() }
    }
}

/// Health of one dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, critical: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, critical: true, message: Some(message.into()) }
    }

    /// Mark the component as informational.
    pub fn non_critical(mut self) -> Self {
        self.critical = false;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
