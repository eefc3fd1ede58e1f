//! Booking saga: creation, update and cancellation

mod locks;
pub mod ports;
mod service;

pub use locks::BookingLocks;
pub use service::{BookingPolicy, BookingService};
