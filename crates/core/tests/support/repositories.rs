//! Mock repository implementations for testing
//!
//! In-memory stand-ins for the availability and booking stores, with switches
//! for injecting failures.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use staybook_core::{AvailabilityRepository, BookingRepository};
use staybook_domain::{AvailabilityRecord, Booking, Result as DomainResult, StaybookError};
use tokio::sync::Barrier;

/// In-memory mock for `AvailabilityRepository`.
///
/// Keyed by `(property_id, date)` so writes behave as upserts.
#[derive(Default, Clone)]
pub struct MockAvailabilityRepository {
    records: Arc<Mutex<BTreeMap<(String, NaiveDate), AvailabilityRecord>>>,
    fail_reads: Arc<AtomicBool>,
    /// Fail `bulk_upsert` after this many records were written.
    fail_bulk_after: Arc<Mutex<Option<usize>>>,
    read_barrier: Option<Arc<Barrier>>,
    reads: Arc<AtomicUsize>,
}

impl MockAvailabilityRepository {
    /// Every `find_range` call waits until `parties` callers are inside it.
    pub fn with_read_barrier(parties: usize) -> Self {
        Self { read_barrier: Some(Arc::new(Barrier::new(parties))), ..Self::default() }
    }

    pub fn seed(&self, record: AvailabilityRecord) {
        self.records.lock().unwrap().insert((record.property_id.clone(), record.date), record);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_bulk_after(&self, written: usize) {
        *self.fail_bulk_after.lock().unwrap() = Some(written);
    }

    pub fn records(&self) -> Vec<AvailabilityRecord> {
        self.records.lock().unwrap().values().cloned().collect()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepository {
    async fn find_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<AvailabilityRecord>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.read_barrier {
            barrier.wait().await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StaybookError::Database("availability store offline".into()));
        }

        Ok(self
            .records
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.property_id == property_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: AvailabilityRecord) -> DomainResult<AvailabilityRecord> {
        self.seed(record.clone());
        Ok(record)
    }

    async fn bulk_upsert(&self, records: Vec<AvailabilityRecord>) -> DomainResult<usize> {
        let limit = *self.fail_bulk_after.lock().unwrap();
        let mut written = 0;
        for record in records {
            if limit == Some(written) {
                return Err(StaybookError::Database("disk full".into()));
            }
            self.seed(record);
            written += 1;
        }
        Ok(written)
    }
}

/// In-memory mock for `BookingRepository`.
#[derive(Default, Clone)]
pub struct MockBookingRepository {
    bookings: Arc<Mutex<Vec<Booking>>>,
    fail_create: Arc<AtomicBool>,
    fail_update: Arc<AtomicBool>,
}

impl MockBookingRepository {
    pub fn insert(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }

    pub fn all(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    pub fn get(&self, id: &str) -> Option<Booking> {
        self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StaybookError::Database("booking store offline".into()));
        }
        self.insert(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.get(id))
    }

    async fn update(&self, booking: Booking) -> DomainResult<Booking> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StaybookError::Database("booking store offline".into()));
        }
        let mut bookings = self.bookings.lock().unwrap();
        let slot = bookings
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or_else(|| StaybookError::NotFound(booking.id.clone()))?;
        *slot = booking.clone();
        Ok(booking)
    }

    async fn list_all(&self) -> DomainResult<Vec<Booking>> {
        Ok(self.all())
    }

    async fn list_by_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        Ok(self.all().into_iter().filter(|b| b.user_id == user_id).collect())
    }

    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|b| {
                b.property_id == property_id && b.status.is_active() && b.overlaps(check_in, check_out)
            })
            .collect())
    }
}
