//! SQLite implementation of the `BookingRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row, ToSql};
use staybook_core::BookingRepository;
use staybook_domain::{Booking, Result as DomainResult, StaybookError};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

const SELECT_COLUMNS: &str = "SELECT id, user_id, property_id, check_in_ts, check_out_ts,
        guests_count, total_price, deposit_paid, deposit_refunded, status, payment_status,
        payment_method, transaction_id, special_requests, calendar_event_id,
        cancellation_reason, cancellation_ts, created_at, updated_at
     FROM bookings";

/// SQLite-backed implementation of `BookingRepository`
pub struct SqliteBookingRepository {
    db: Arc<DbManager>,
}

impl SqliteBookingRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }

    async fn query(
        &self,
        sql: String,
        args: Vec<Box<dyn ToSql + Send>>,
    ) -> DomainResult<Vec<Booking>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Booking>> {
            let conn = db.get_connection()?;
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let params: Vec<&dyn ToSql> = args.iter().map(|a| a.as_ref() as &dyn ToSql).collect();
            let bookings = stmt
                .query_map(params.as_slice(), map_booking_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(bookings)
        })
        .await
        .map_err(InfraError::from)?
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
    async fn create(&self, booking: Booking) -> DomainResult<Booking> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Booking> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO bookings (
                    id, user_id, property_id, check_in_ts, check_out_ts, guests_count,
                    total_price, deposit_paid, deposit_refunded, status, payment_status,
                    payment_method, transaction_id, special_requests, calendar_event_id,
                    cancellation_reason, cancellation_ts, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                params![
                    booking.id,
                    booking.user_id,
                    booking.property_id,
                    booking.check_in_date.timestamp_millis(),
                    booking.check_out_date.timestamp_millis(),
                    booking.guests_count,
                    booking.total_price,
                    booking.deposit_paid,
                    booking.deposit_refunded,
                    booking.status.to_string(),
                    booking.payment_status.to_string(),
                    booking.payment_method,
                    booking.transaction_id,
                    booking.special_requests,
                    booking.calendar_event_id,
                    booking.cancellation_reason,
                    booking.cancellation_date.map(|d| d.timestamp_millis()),
                    booking.created_at.timestamp_millis(),
                    booking.updated_at.timestamp_millis(),
                ],
            )
            .map_err(map_sql_error)?;

            debug!("booking inserted");
            Ok(booking)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Booking>> {
            let conn = db.get_connection()?;
            conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], map_booking_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
    async fn update(&self, booking: Booking) -> DomainResult<Booking> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Booking> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE bookings SET
                        check_in_ts = ?2, check_out_ts = ?3, guests_count = ?4, total_price = ?5,
                        deposit_paid = ?6, deposit_refunded = ?7, status = ?8, payment_status = ?9,
                        payment_method = ?10, transaction_id = ?11, special_requests = ?12,
                        calendar_event_id = ?13, cancellation_reason = ?14, cancellation_ts = ?15,
                        updated_at = ?16
                     WHERE id = ?1",
                    params![
                        booking.id,
                        booking.check_in_date.timestamp_millis(),
                        booking.check_out_date.timestamp_millis(),
                        booking.guests_count,
                        booking.total_price,
                        booking.deposit_paid,
                        booking.deposit_refunded,
                        booking.status.to_string(),
                        booking.payment_status.to_string(),
                        booking.payment_method,
                        booking.transaction_id,
                        booking.special_requests,
                        booking.calendar_event_id,
                        booking.cancellation_reason,
                        booking.cancellation_date.map(|d| d.timestamp_millis()),
                        booking.updated_at.timestamp_millis(),
                    ],
                )
                .map_err(map_sql_error)?;

            if changed == 0 {
                return Err(StaybookError::NotFound(format!("booking {}", booking.id)));
            }
            Ok(booking)
        })
        .await
        .map_err(InfraError::from)?
    }

    async fn list_all(&self) -> DomainResult<Vec<Booking>> {
        self.query(format!("{SELECT_COLUMNS} ORDER BY created_at DESC"), Vec::new()).await
    }

    async fn list_by_user(&self, user_id: &str) -> DomainResult<Vec<Booking>> {
        self.query(
            format!("{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at DESC"),
            vec![Box::new(user_id.to_string())],
        )
        .await
    }

    #[instrument(skip(self))]
    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        self.query(
            format!(
                "{SELECT_COLUMNS}
                 WHERE property_id = ?1
                   AND status IN ('pending', 'confirmed')
                   AND check_in_ts < ?3
                   AND check_out_ts > ?2
                 ORDER BY check_in_ts"
            ),
            vec![
                Box::new(property_id.to_string()),
                Box::new(check_in.timestamp_millis()),
                Box::new(check_out.timestamp_millis()),
            ],
        )
        .await
    }
}

fn map_booking_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: row.get(0)?,
        user_id: row.get(1)?,
        property_id: row.get(2)?,
        check_in_date: millis_column(row, 3)?,
        check_out_date: millis_column(row, 4)?,
        guests_count: row.get(5)?,
        total_price: row.get(6)?,
        deposit_paid: row.get(7)?,
        deposit_refunded: row.get(8)?,
        status: parse_column(row, 9)?,
        payment_status: parse_column(row, 10)?,
        payment_method: row.get(11)?,
        transaction_id: row.get(12)?,
        special_requests: row.get(13)?,
        calendar_event_id: row.get(14)?,
        cancellation_reason: row.get(15)?,
        cancellation_date: row
            .get::<_, Option<i64>>(16)?
            .map(|ms| millis_to_datetime(16, ms))
            .transpose()?,
        created_at: millis_column(row, 17)?,
        updated_at: millis_column(row, 18)?,
    })
}

fn millis_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    millis_to_datetime(idx, row.get(idx)?)
}

fn millis_to_datetime(idx: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(rusqlite::Error::IntegralValueOutOfRange(idx, millis))
}

fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}
