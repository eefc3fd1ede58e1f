//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Staybook
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StaybookError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested window is not bookable.
    #[error("{0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StaybookError {
    /// Stable label for logging fields.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Forbidden(_) => "forbidden",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Unavailable(_) => "unavailable",
            Self::Internal(_) => "internal",
        }
    }

    /// Message without the variant prefix, suitable for response bodies.
    pub fn message(&self) -> &str {
        match self {
            Self::Database(m)
            | Self::Config(m)
            | Self::Network(m)
            | Self::Auth(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::InvalidInput(m)
            | Self::Unavailable(m)
            | Self::Internal(m) => m,
        }
    }
}

/// Result type alias for Staybook operations
pub type Result<T> = std::result::Result<T, StaybookError>;
