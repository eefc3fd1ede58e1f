//! Booking service - the reservation saga
//!
//! Creation runs check -> persist -> bridge -> stitch. Only the persist step
//! can fail the request; bridging to the calendar is best-effort.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use staybook_domain::constants::{
    DEFAULT_CANCELLATION_NOTICE_HOURS, DEFAULT_CANCELLATION_REASON, NOT_AVAILABLE_MESSAGE,
};
use staybook_domain::types::booking::validate_window;
use staybook_domain::{
    Actor, Attendee, Booking, BookingEventMetadata, BookingPolicyConfig, BookingStatus,
    BookingUpdate, CalendarEventInput, NewBooking, Result, StaybookError,
};
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::locks::BookingLocks;
use super::ports::{BookingRepository, PropertyDirectory};
use crate::availability::AvailabilityService;
use crate::calendar::CalendarEventService;
use crate::clock::{Clock, SystemClock};

/// Rules applied to booking changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Minimum time between a non-admin cancellation and check-in.
    pub cancellation_notice: Duration,
    /// Serialize check-and-persist per property and reject windows that
    /// overlap an active booking.
    pub serialize_per_property: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            cancellation_notice: Duration::hours(DEFAULT_CANCELLATION_NOTICE_HOURS),
            serialize_per_property: false,
        }
    }
}

impl From<&BookingPolicyConfig> for BookingPolicy {
    fn from(config: &BookingPolicyConfig) -> Self {
        Self {
            cancellation_notice: Duration::hours(config.cancellation_notice_hours),
            serialize_per_property: config.serialize_per_property,
        }
    }
}

/// Booking service
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    availability: Arc<AvailabilityService>,
    calendar: Arc<CalendarEventService>,
    properties: Arc<dyn PropertyDirectory>,
    clock: Arc<dyn Clock>,
    policy: BookingPolicy,
    locks: BookingLocks,
}

impl BookingService {
    /// Create a new booking service with the default policy and system clock
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        availability: Arc<AvailabilityService>,
        calendar: Arc<CalendarEventService>,
        properties: Arc<dyn PropertyDirectory>,
    ) -> Self {
        Self {
            bookings,
            availability,
            calendar,
            properties,
            clock: Arc::new(SystemClock),
            policy: BookingPolicy::default(),
            locks: BookingLocks::new(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_policy(mut self, policy: BookingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Create a booking for `actor`.
    ///
    /// Returns the booking with its calendar event id when mirroring
    /// succeeded, or without it when mirroring failed.
    pub async fn create_booking(&self, actor: &Actor, request: NewBooking) -> Result<Booking> {
        request.validate()?;
        let property_id = request.property_id.clone();

        let guard = self.serialize(&property_id).await;
        self.ensure_bookable(&property_id, request.check_in_date, request.check_out_date, None)
            .await?;

        let booking = Booking::from_request(
            Uuid::new_v4().to_string(),
            &actor.id,
            request,
            self.clock.now(),
        );
        let booking = self.bookings.create(booking).await?;
        drop(guard);

        info!(booking_id = %booking.id, property_id = %booking.property_id, "Booking created");

        match self.mirror_to_calendar(actor, &booking).await {
            Ok(mirrored) => Ok(mirrored),
            Err(err) => {
                error!(
                    booking_id = %booking.id,
                    error = %err,
                    "Failed to mirror booking to calendar; continuing without event"
                );
                Ok(booking)
            }
        }
    }

    /// Apply a partial update to a booking the actor may manage.
    ///
    /// Date changes re-run the availability check on the merged window. The
    /// linked calendar event is not touched.
    pub async fn update_booking(
        &self,
        actor: &Actor,
        booking_id: &str,
        update: BookingUpdate,
    ) -> Result<Booking> {
        let mut booking = self.load(booking_id).await?;
        authorize(actor, &booking)?;

        if booking.status.is_terminal() {
            return Err(StaybookError::InvalidInput(format!(
                "Booking is already {} and cannot be updated",
                booking.status
            )));
        }

        if let Some(next) = update.status {
            // Cancellation carries its own notice rule and calendar cleanup.
            if next == BookingStatus::Cancelled {
                return Err(StaybookError::InvalidInput(
                    "Use the cancel operation to cancel a booking".into(),
                ));
            }
            if !booking.status.can_transition_to(next) {
                return Err(StaybookError::InvalidInput(format!(
                    "Cannot change booking status from {} to {next}",
                    booking.status
                )));
            }
        }
        if update.guests_count == Some(0) {
            return Err(StaybookError::InvalidInput("guestsCount must be at least 1".into()));
        }
        if update.total_price.is_some_and(|price| !price.is_finite() || price < 0.0) {
            return Err(StaybookError::InvalidInput("totalPrice must be zero or more".into()));
        }

        let _guard = if update.changes_dates() {
            let check_in = update.check_in_date.unwrap_or(booking.check_in_date);
            let check_out = update.check_out_date.unwrap_or(booking.check_out_date);
            validate_window(check_in, check_out)?;

            let guard = self.serialize(&booking.property_id).await;
            self.ensure_bookable(&booking.property_id, check_in, check_out, Some(&booking.id))
                .await?;
            guard
        } else {
            None
        };

        update.apply_to(&mut booking, self.clock.now());
        let booking = self.bookings.update(booking).await?;

        info!(booking_id = %booking.id, status = %booking.status, "Booking updated");
        Ok(booking)
    }

    /// Cancel a booking and remove its calendar event.
    ///
    /// Non-admins must cancel at least the configured notice before check-in.
    /// Failing to delete the event does not undo the cancellation.
    pub async fn cancel_booking(
        &self,
        actor: &Actor,
        booking_id: &str,
        reason: Option<String>,
    ) -> Result<Booking> {
        let mut booking = self.load(booking_id).await?;
        authorize(actor, &booking)?;

        if !booking.status.is_active() {
            return Err(StaybookError::InvalidInput(format!(
                "Booking is already {} and cannot be cancelled",
                booking.status
            )));
        }

        let now = self.clock.now();
        if !actor.is_admin() && booking.check_in_date - now < self.policy.cancellation_notice {
            return Err(StaybookError::InvalidInput(format!(
                "Bookings can only be cancelled at least {} hours before check-in",
                self.policy.cancellation_notice.num_hours()
            )));
        }

        booking.status = BookingStatus::Cancelled;
        booking.cancellation_reason = Some(
            reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string()),
        );
        booking.cancellation_date = Some(now);
        booking.updated_at = now;
        let booking = self.bookings.update(booking).await?;

        info!(booking_id = %booking.id, actor_id = %actor.id, "Booking cancelled");

        if let Some(event_id) = booking.calendar_event_id.as_deref() {
            if let Err(err) = self.calendar.delete_event(event_id).await {
                error!(
                    booking_id = %booking.id,
                    event_id,
                    error = %err,
                    "Failed to delete calendar event for cancelled booking"
                );
            }
        }

        Ok(booking)
    }

    pub async fn get_booking(&self, actor: &Actor, booking_id: &str) -> Result<Booking> {
        let booking = self.load(booking_id).await?;
        authorize(actor, &booking)?;
        Ok(booking)
    }

    /// Every booking. Admin only.
    pub async fn list_bookings(&self, actor: &Actor) -> Result<Vec<Booking>> {
        if !actor.is_admin() {
            return Err(StaybookError::Forbidden(format!(
                "User {} is not authorized to list all bookings",
                actor.id
            )));
        }
        self.bookings.list_all().await
    }

    pub async fn list_user_bookings(&self, actor: &Actor) -> Result<Vec<Booking>> {
        self.bookings.list_by_user(&actor.id).await
    }

    async fn load(&self, booking_id: &str) -> Result<Booking> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| StaybookError::NotFound(format!("Booking not found with id of {booking_id}")))
    }

    async fn serialize(&self, property_id: &str) -> Option<OwnedMutexGuard<()>> {
        if self.policy.serialize_per_property {
            Some(self.locks.acquire(property_id).await)
        } else {
            None
        }
    }

    /// Reject the window when a day is blocked, or, in serialized mode, when
    /// another active booking overlaps it.
    async fn ensure_bookable(
        &self,
        property_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        ignore_booking: Option<&str>,
    ) -> Result<()> {
        let available = self
            .availability
            .is_range_available(property_id, check_in.date_naive(), check_out.date_naive())
            .await?;
        if !available {
            return Err(StaybookError::Unavailable(NOT_AVAILABLE_MESSAGE.to_string()));
        }

        if self.policy.serialize_per_property {
            let overlapping = self.bookings.find_overlapping(property_id, check_in, check_out).await?;
            if overlapping.iter().any(|b| Some(b.id.as_str()) != ignore_booking) {
                warn!(property_id, "Rejected window overlapping an active booking");
                return Err(StaybookError::Unavailable(NOT_AVAILABLE_MESSAGE.to_string()));
            }
        }
        Ok(())
    }

    /// Create the calendar event for `booking` and store its id.
    async fn mirror_to_calendar(&self, actor: &Actor, booking: &Booking) -> Result<Booking> {
        let property = self.properties.get_property(&booking.property_id).await?;
        let guest_name = actor.display_name();

        let input = CalendarEventInput {
            summary: format!("{} - {}", property.title, guest_name),
            description: Some(format!(
                "Booking {} for {} guest(s)",
                booking.id, booking.guests_count
            )),
            start: booking.check_in_date,
            end: booking.check_out_date,
            time_zone: None,
            attendee: actor
                .email
                .clone()
                .map(|email| Attendee { email, display_name: Some(guest_name.clone()) }),
            booking_info: Some(BookingEventMetadata {
                booking_id: booking.id.clone(),
                property_id: booking.property_id.clone(),
                property_name: property.title,
                guest_id: booking.user_id.clone(),
                guest_name,
                guest_email: actor.email.clone(),
                check_in_date: booking.check_in_date,
                check_out_date: booking.check_out_date,
            }),
        };

        let event = self.calendar.create_event(input).await?;

        let mut stitched = booking.clone();
        stitched.calendar_event_id = Some(event.id);
        stitched.updated_at = self.clock.now();
        self.bookings.update(stitched).await
    }
}

/// Only the booking's owner or an admin may read or change it.
fn authorize(actor: &Actor, booking: &Booking) -> Result<()> {
    if booking.is_owned_by(&actor.id) || actor.is_admin() {
        return Ok(());
    }
    Err(StaybookError::Forbidden(format!(
        "User {} is not authorized to access this booking",
        actor.id
    )))
}
