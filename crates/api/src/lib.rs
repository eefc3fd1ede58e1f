//! # Staybook API
//!
//! axum application layer - routes and main entry point.
//!
//! This crate contains:
//! - REST routes for bookings, availability and calendar events
//! - Application context (dependency injection)
//! - Request identity extraction and error mapping
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::router;
