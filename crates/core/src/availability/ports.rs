//! Port interfaces for per-day availability storage

use async_trait::async_trait;
use chrono::NaiveDate;
use staybook_domain::{AvailabilityRecord, Result};

/// Trait for persisting availability overrides
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Records for `property_id` with `start <= date <= end`, ordered by date.
    async fn find_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityRecord>>;

    /// Insert or replace the record for `(property_id, date)`.
    async fn upsert(&self, record: AvailabilityRecord) -> Result<AvailabilityRecord>;

    /// Upsert every record and return how many were written.
    ///
    /// Not atomic: a failure part-way leaves earlier days written.
    async fn bulk_upsert(&self, records: Vec<AvailabilityRecord>) -> Result<usize>;
}
