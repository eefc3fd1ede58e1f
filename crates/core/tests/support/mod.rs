//! Shared test helpers for `staybook-core` integration tests.
//!
//! These helpers provide in-memory ports and fixtures so the saga tests can
//! focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod calendar;
pub mod repositories;

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use staybook_core::{
    AvailabilityService, BookingPolicy, BookingService, CalendarEventService, FixedClock,
};
use staybook_domain::{Actor, NewBooking, Role};

use self::calendar::{MockCalendarProvider, MockPropertyDirectory};
use self::repositories::{MockAvailabilityRepository, MockBookingRepository};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn guest() -> Actor {
    Actor::new("user-1", Role::User).with_email("guest@example.com").with_name("Ada", "Lovelace")
}

pub fn admin() -> Actor {
    Actor::new("admin-1", Role::Admin).with_email("admin@example.com")
}

pub fn stranger() -> Actor {
    Actor::new("user-2", Role::User)
}

/// Request for property `p-1` between the given check-in and check-out days
/// of June 2025.
pub fn request(check_in: u32, check_out: u32) -> NewBooking {
    NewBooking {
        property_id: "p-1".into(),
        check_in_date: at(2025, 6, check_in, 0),
        check_out_date: at(2025, 6, check_out, 0),
        guests_count: 2,
        total_price: 450.0,
        deposit_paid: false,
        payment_status: None,
        payment_method: None,
        transaction_id: None,
        special_requests: None,
        initial_status: None,
    }
}

/// Fully wired saga over in-memory ports.
pub struct Harness {
    pub availability_repo: MockAvailabilityRepository,
    pub bookings: MockBookingRepository,
    pub provider: MockCalendarProvider,
    pub properties: MockPropertyDirectory,
    pub clock: FixedClock,
    pub availability: Arc<AvailabilityService>,
    pub service: Arc<BookingService>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_parts(MockAvailabilityRepository::default(), BookingPolicy::default())
    }

    pub fn with_policy(policy: BookingPolicy) -> Self {
        Self::with_parts(MockAvailabilityRepository::default(), policy)
    }

    pub fn with_parts(availability_repo: MockAvailabilityRepository, policy: BookingPolicy) -> Self {
        let bookings = MockBookingRepository::default();
        let provider = MockCalendarProvider::default();
        let properties = MockPropertyDirectory::default().with_property("p-1", "Sea View Loft");
        // Well ahead of the June 2025 fixtures.
        let clock = FixedClock::new(at(2025, 5, 1, 12));

        let availability = Arc::new(AvailabilityService::new(Arc::new(availability_repo.clone())));
        let calendar = Arc::new(CalendarEventService::new(Arc::new(provider.clone())));
        let service = BookingService::new(
            Arc::new(bookings.clone()),
            availability.clone(),
            calendar,
            Arc::new(properties.clone()),
        )
        .with_clock(Arc::new(clock.clone()))
        .with_policy(policy);

        Self {
            availability_repo,
            bookings,
            provider,
            properties,
            clock,
            availability,
            service: Arc::new(service),
        }
    }
}
