//! Port interfaces for the booking saga
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use staybook_domain::{Booking, PropertySummary, Result};

/// Trait for persisting bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a new booking.
    async fn create(&self, booking: Booking) -> Result<Booking>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>>;

    /// Replace an existing booking. Missing ids yield `NotFound`.
    async fn update(&self, booking: Booking) -> Result<Booking>;

    async fn list_all(&self) -> Result<Vec<Booking>>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>>;

    /// Pending or confirmed bookings of `property_id` whose window
    /// intersects `[check_in, check_out)`.
    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;
}

/// Trait for looking up properties owned by the properties service
#[async_trait]
pub trait PropertyDirectory: Send + Sync {
    async fn get_property(&self, property_id: &str) -> Result<PropertySummary>;
}
