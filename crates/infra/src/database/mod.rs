//! Database implementations

pub mod availability_repository;
pub mod booking_repository;
pub mod manager;

pub use availability_repository::*;
pub use booking_repository::*;
pub use manager::*;
