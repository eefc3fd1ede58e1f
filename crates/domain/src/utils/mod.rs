//! Pure helper functions shared by the service and adapter layers

pub mod dates;
