//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Booking policy
pub const DEFAULT_CANCELLATION_NOTICE_HOURS: i64 = 48;
pub const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";
pub const DEFAULT_PAYMENT_METHOD: &str = "PayPal";
pub const NOT_AVAILABLE_MESSAGE: &str = "Property is not available for the requested dates";

// Calendar bridging
pub const DEFAULT_CALENDAR_ID: &str = "primary";
pub const DEFAULT_TIME_ZONE: &str = "Europe/Paris";
pub const BOOKING_INFO_KEY: &str = "bookingInfo";
pub const DEFAULT_EVENT_LIST_LIMIT: u32 = 10;

// Property lookup cache
pub const DEFAULT_PROPERTY_CACHE_TTL_SECS: u64 = 300;
