//! Macro for implementing Display and FromStr for status enums
//!
//! Booking and payment statuses are stored and transported as lowercase
//! strings. This macro keeps the string mapping in one place for both
//! directions and parses case-insensitively.
//!
//! # Example
//!
//! ```rust
//! use staybook_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum RefundStatus {
//!     Requested,
//!     Issued,
//! }
//!
//! impl_domain_status_conversions!(RefundStatus {
//!     Requested => "requested",
//!     Issued => "issued",
//! });
//!
//! assert_eq!(RefundStatus::Issued.to_string(), "issued");
//! assert_eq!("REQUESTED".parse::<RefundStatus>(), Ok(RefundStatus::Requested));
//! ```

/// Implements Display and FromStr traits for status enums
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => ::std::result::Result::Ok(Self::$variant),)+
                    _ => ::std::result::Result::Err(::std::format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
