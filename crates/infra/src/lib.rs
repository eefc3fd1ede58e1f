//! # Staybook Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for bookings and availability
//! - The retrying HTTP client shared by outbound adapters
//! - Google Calendar and properties service integrations
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `staybook-core`
//! - Contains all "impure" code (I/O, network)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::*;
pub use errors::*;
pub use http::*;
pub use integrations::calendar::{build_provider, DisabledCalendarProvider, GoogleCalendarProvider};
pub use integrations::properties::HttpPropertyDirectory;
