//! Pure date helpers for day-granular availability and booking windows

use chrono::{DateTime, Days, NaiveDate, Utc};

use crate::{Result, StaybookError};

/// Iterate every calendar day in the half-open range `[start, end)`.
///
/// Yields nothing when `start >= end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook_domain::utils::dates::days_between;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
/// assert_eq!(days_between(start, end).count(), 3);
/// assert_eq!(days_between(end, end).count(), 0);
/// ```
pub fn days_between(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day < end)
}

/// Iterate every calendar day in the inclusive range `[start, end]`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use staybook_domain::utils::dates::days_inclusive;
///
/// let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert_eq!(days_inclusive(day, day).count(), 1);
/// ```
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// Day before `date`, saturating at the minimum representable date.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}

/// Parse either a plain `YYYY-MM-DD` date (midnight UTC) or an RFC 3339
/// timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(start_of_day(date));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StaybookError::InvalidInput(format!("invalid date '{value}': {e}")))
}

/// Parse a calendar day from a plain date or an RFC 3339 timestamp.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    parse_timestamp(value).map(|dt| dt.date_naive())
}

/// Midnight UTC of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

/// Serde adapter for `DateTime<Utc>` fields that also accept plain dates.
pub mod flexible {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(|e| serde::de::Error::custom(e.message().to_string()))
    }

    /// Same as the parent adapter, for `Option<DateTime<Utc>>` fields.
    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|value| {
                crate::utils::dates::parse_timestamp(&value)
                    .map_err(|e| serde::de::Error::custom(e.message().to_string()))
            })
            .transpose()
        }
    }
}
