//! Per-day availability: evaluation and updates

pub mod ports;
mod service;

pub use service::AvailabilityService;
