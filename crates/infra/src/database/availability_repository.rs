//! SQLite implementation of the `AvailabilityRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use staybook_core::AvailabilityRepository;
use staybook_domain::{AvailabilityRecord, Result as DomainResult};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed implementation of `AvailabilityRepository`
pub struct SqliteAvailabilityRepository {
    db: Arc<DbManager>,
}

impl SqliteAvailabilityRepository {
    /// Create a new repository instance
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepository {
    #[instrument(skip(self))]
    async fn find_range(
        &self,
        property_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<AvailabilityRecord>> {
        let db = Arc::clone(&self.db);
        let property_id = property_id.to_string();

        task::spawn_blocking(move || -> DomainResult<Vec<AvailabilityRecord>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT property_id, date, is_available, custom_price, calendar_event_id, notes
                     FROM availability
                     WHERE property_id = ?1 AND date >= ?2 AND date <= ?3
                     ORDER BY date",
                )
                .map_err(map_sql_error)?;

            let records = stmt
                .query_map(
                    params![
                        property_id,
                        start.format(DATE_FORMAT).to_string(),
                        end.format(DATE_FORMAT).to_string()
                    ],
                    map_availability_row,
                )
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;

            debug!(count = records.len(), "loaded availability records");
            Ok(records)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self, record), fields(property_id = %record.property_id, date = %record.date))]
    async fn upsert(&self, record: AvailabilityRecord) -> DomainResult<AvailabilityRecord> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<AvailabilityRecord> {
            let conn = db.get_connection()?;
            upsert_record(&conn, &record)?;
            Ok(record)
        })
        .await
        .map_err(InfraError::from)?
    }

    #[instrument(skip(self, records), fields(count = records.len()))]
    async fn bulk_upsert(&self, records: Vec<AvailabilityRecord>) -> DomainResult<usize> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<usize> {
            let conn = db.get_connection()?;
            // Day by day with no surrounding transaction.
            let mut written = 0;
            for record in &records {
                upsert_record(&conn, record)?;
                written += 1;
            }
            Ok(written)
        })
        .await
        .map_err(InfraError::from)?
    }
}

fn upsert_record(conn: &Connection, record: &AvailabilityRecord) -> DomainResult<()> {
    conn.execute(
        "INSERT INTO availability (
            property_id, date, is_available, custom_price, calendar_event_id, notes, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(property_id, date) DO UPDATE SET
            is_available = excluded.is_available,
            custom_price = excluded.custom_price,
            calendar_event_id = excluded.calendar_event_id,
            notes = excluded.notes,
            updated_at = excluded.updated_at",
        params![
            record.property_id,
            record.date.format(DATE_FORMAT).to_string(),
            record.is_available,
            record.custom_price,
            record.calendar_event_id,
            record.notes,
            Utc::now().timestamp_millis(),
        ],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

fn map_availability_row(row: &Row<'_>) -> rusqlite::Result<AvailabilityRecord> {
    let raw_date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(AvailabilityRecord {
        property_id: row.get(0)?,
        date,
        is_available: row.get(2)?,
        custom_price: row.get(3)?,
        calendar_event_id: row.get(4)?,
        notes: row.get(5)?,
    })
}
