//! Domain types and models

pub mod actor;
pub mod availability;
pub mod booking;
pub mod calendar;
pub mod property;

pub use actor::{Actor, Role};
pub use availability::{AvailabilityDay, AvailabilityPatch, AvailabilityRecord, AvailabilityUpdate};
pub use booking::{Booking, BookingStatus, BookingUpdate, NewBooking, PaymentStatus};
pub use calendar::{Attendee, BookingEventMetadata, CalendarEvent, CalendarEventInput, EventWindow};
pub use property::PropertySummary;
