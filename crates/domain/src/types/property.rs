//! Property data borrowed from the properties service

use serde::{Deserialize, Serialize};

/// The subset of a property the booking side needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
}
