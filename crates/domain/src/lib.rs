//! # Staybook Domain
//!
//! Business domain types and models for Staybook.
//!
//! This crate contains:
//! - Domain data types (Booking, AvailabilityRecord, CalendarEventInput, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and date helpers
//!
//! ## Architecture
//! - No dependencies on other Staybook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
