//! # Staybook Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits)
//! - Availability evaluation and updates
//! - Calendar event bridging
//! - The booking reservation saga
//!
//! ## Architecture Principles
//! - Only depends on `staybook-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod availability;
pub mod booking;
pub mod calendar;
pub mod clock;

// Re-export specific items to avoid ambiguity
pub use availability::ports::AvailabilityRepository;
pub use availability::AvailabilityService;
pub use booking::ports::{BookingRepository, PropertyDirectory};
pub use booking::{BookingLocks, BookingPolicy, BookingService};
pub use calendar::ports::CalendarProvider;
pub use calendar::CalendarEventService;
pub use clock::{Clock, FixedClock, SystemClock};
