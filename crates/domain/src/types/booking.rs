//! Booking records and their lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAYMENT_METHOD;
use crate::utils::dates::flexible;
use crate::{impl_domain_status_conversions, Result, StaybookError};

/// Booking lifecycle state.
///
/// Transitions only move forward: `pending -> confirmed`,
/// `pending | confirmed -> cancelled`, `confirmed -> completed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl_domain_status_conversions!(BookingStatus {
    Pending => "pending",
    Confirmed => "confirmed",
    Cancelled => "cancelled",
    Completed => "completed",
});

impl BookingStatus {
    /// Whether moving from `self` to `next` is allowed. Same-state moves are
    /// always allowed and are treated as no-ops by callers.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        self == next
            || matches!(
                (self, next),
                (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) | (Confirmed, Completed)
            )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    /// Bookings in these states occupy their window.
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
    Partial,
}

impl_domain_status_conversions!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
    Refunded => "refunded",
    Partial => "partial",
});

/// A persisted reservation of a property by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub property_id: String,
    #[serde(with = "flexible")]
    pub check_in_date: DateTime<Utc>,
    #[serde(with = "flexible")]
    pub check_out_date: DateTime<Utc>,
    pub guests_count: u32,
    pub total_price: f64,
    pub deposit_paid: bool,
    pub deposit_refunded: bool,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub special_requests: Option<String>,
    pub calendar_event_id: Option<String>,
    pub cancellation_reason: Option<String>,
    #[serde(default, with = "flexible::option")]
    pub cancellation_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a fresh booking for `user_id` from a validated request.
    pub fn from_request(
        id: impl Into<String>,
        user_id: impl Into<String>,
        request: NewBooking,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            property_id: request.property_id,
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            guests_count: request.guests_count,
            total_price: request.total_price,
            deposit_paid: request.deposit_paid,
            deposit_refunded: false,
            status: request.initial_status.unwrap_or_default(),
            payment_status: request.payment_status.unwrap_or_default(),
            payment_method: request
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            transaction_id: request.transaction_id,
            special_requests: request.special_requests,
            calendar_event_id: None,
            cancellation_reason: None,
            cancellation_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Whether `[check_in, check_out)` intersects this booking's window.
    pub fn overlaps(&self, check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> bool {
        self.check_in_date < check_out && check_in < self.check_out_date
    }
}

/// Booking creation request as accepted from clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub property_id: String,
    #[serde(with = "flexible")]
    pub check_in_date: DateTime<Utc>,
    #[serde(with = "flexible")]
    pub check_out_date: DateTime<Utc>,
    pub guests_count: u32,
    pub total_price: f64,
    #[serde(default)]
    pub deposit_paid: bool,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub special_requests: Option<String>,
    /// Only `pending` and `confirmed` are accepted.
    #[serde(default, alias = "status")]
    pub initial_status: Option<BookingStatus>,
}

impl NewBooking {
    pub fn validate(&self) -> Result<()> {
        if self.property_id.trim().is_empty() {
            return Err(StaybookError::InvalidInput("propertyId is required".into()));
        }
        validate_window(self.check_in_date, self.check_out_date)?;
        if self.guests_count == 0 {
            return Err(StaybookError::InvalidInput("guestsCount must be at least 1".into()));
        }
        validate_price(self.total_price)?;
        if let Some(status) = self.initial_status {
            if !status.is_active() {
                return Err(StaybookError::InvalidInput(format!(
                    "a new booking cannot start as {status}"
                )));
            }
        }
        Ok(())
    }
}

/// Partial update of an existing booking. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUpdate {
    #[serde(default, with = "flexible::option", skip_serializing_if = "Option::is_none")]
    pub check_in_date: Option<DateTime<Utc>>,
    #[serde(default, with = "flexible::option", skip_serializing_if = "Option::is_none")]
    pub check_out_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_paid: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit_refunded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl BookingUpdate {
    pub fn changes_dates(&self) -> bool {
        self.check_in_date.is_some() || self.check_out_date.is_some()
    }

    /// Apply every present field to `booking`. Status and date rules are
    /// checked by the caller beforehand.
    pub fn apply_to(&self, booking: &mut Booking, now: DateTime<Utc>) {
        if let Some(check_in) = self.check_in_date {
            booking.check_in_date = check_in;
        }
        if let Some(check_out) = self.check_out_date {
            booking.check_out_date = check_out;
        }
        if let Some(guests) = self.guests_count {
            booking.guests_count = guests;
        }
        if let Some(price) = self.total_price {
            booking.total_price = price;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(payment_status) = self.payment_status {
            booking.payment_status = payment_status;
        }
        if let Some(method) = &self.payment_method {
            booking.payment_method = method.clone();
        }
        if let Some(tx) = &self.transaction_id {
            booking.transaction_id = Some(tx.clone());
        }
        if let Some(paid) = self.deposit_paid {
            booking.deposit_paid = paid;
        }
        if let Some(refunded) = self.deposit_refunded {
            booking.deposit_refunded = refunded;
        }
        if let Some(requests) = &self.special_requests {
            booking.special_requests = Some(requests.clone());
        }
        booking.updated_at = now;
    }
}

/// Reject windows where check-in is not strictly before check-out.
pub fn validate_window(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<()> {
    if check_in >= check_out {
        return Err(StaybookError::InvalidInput(
            "checkOutDate must be after checkInDate".into(),
        ));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StaybookError::InvalidInput("totalPrice must be zero or more".into()));
    }
    Ok(())
}
