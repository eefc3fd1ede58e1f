//! Availability service - evaluation of booking windows and day overrides

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use staybook_domain::utils::dates::{days_between, days_inclusive, previous_day};
use staybook_domain::{
    AvailabilityDay, AvailabilityPatch, AvailabilityRecord, AvailabilityUpdate, Result,
    StaybookError,
};
use tracing::{debug, warn};

use super::ports::AvailabilityRepository;

/// Availability service
///
/// A day with no stored record is available. Store failures while reading
/// degrade to "available" instead of failing the caller.
pub struct AvailabilityService {
    repository: Arc<dyn AvailabilityRepository>,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self { repository }
    }

    /// Whether every day in `[start, end)` is bookable.
    pub async fn is_range_available(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        require_property(property_id)?;
        if start > end {
            return Err(StaybookError::InvalidInput(format!(
                "start date {start} is after end date {end}"
            )));
        }
        if start == end {
            return Ok(true);
        }

        let records = match self.repository.find_range(property_id, start, previous_day(end)).await {
            Ok(records) => records,
            Err(err) => {
                warn!(property_id, error = %err, "Availability lookup failed, treating range as available");
                return Ok(true);
            }
        };

        let blocked: HashMap<NaiveDate, bool> =
            records.iter().map(|record| (record.date, record.is_available)).collect();
        let available =
            days_between(start, end).all(|day| blocked.get(&day).copied().unwrap_or(true));

        debug!(property_id, %start, %end, available, "Evaluated availability");
        Ok(available)
    }

    /// Per-day view of `[start, end]`, one entry per day.
    pub async fn daily_availability(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AvailabilityDay>> {
        require_property(property_id)?;
        ensure_ordered(start, end)?;

        let records = self.repository.find_range(property_id, start, end).await.unwrap_or_else(|err| {
            warn!(property_id, error = %err, "Availability lookup failed, rendering all days open");
            Vec::new()
        });
        let by_day: HashMap<NaiveDate, &AvailabilityRecord> =
            records.iter().map(|record| (record.date, record)).collect();

        Ok(days_inclusive(start, end)
            .map(|day| by_day.get(&day).map_or_else(|| AvailabilityDay::open(day), |r| (*r).into()))
            .collect())
    }

    /// Upsert the override for a single day.
    pub async fn set_day(
        &self,
        property_id: &str,
        update: AvailabilityUpdate,
    ) -> Result<AvailabilityRecord> {
        require_property(property_id)?;
        let record = AvailabilityRecord::from_patch(property_id, update.date, &update.patch);
        self.repository.upsert(record).await
    }

    /// Write the same override to every day of `[start, end]`.
    ///
    /// Returns the number of days written.
    pub async fn set_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        patch: AvailabilityPatch,
    ) -> Result<usize> {
        require_property(property_id)?;
        ensure_ordered(start, end)?;

        let records: Vec<_> = days_inclusive(start, end)
            .map(|day| AvailabilityRecord::from_patch(property_id, day, &patch))
            .collect();
        let written = self.repository.bulk_upsert(records).await?;

        debug!(property_id, %start, %end, written, "Updated availability range");
        Ok(written)
    }
}

fn require_property(property_id: &str) -> Result<()> {
    if property_id.trim().is_empty() {
        return Err(StaybookError::InvalidInput("propertyId is required".into()));
    }
    Ok(())
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(StaybookError::InvalidInput(
            "Start date must be before or equal to end date".into(),
        ));
    }
    Ok(())
}
