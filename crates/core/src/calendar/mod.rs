//! Mirroring of bookings into the external calendar

pub mod ports;
mod service;

pub use service::CalendarEventService;
