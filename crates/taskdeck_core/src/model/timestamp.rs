use crate::error::AppError;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Point in time carried by tasks and the storage envelope.
///
/// All serialization goes through the RFC3339 codec here so that no caller
/// has to parse or render date strings ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        OffsetDateTime::parse(value, &Rfc3339)
            .map(Self)
            .map_err(|_| AppError::invalid_data(format!("`{value}` is not an RFC3339 timestamp")))
    }

    pub fn format(&self) -> Result<String, AppError> {
        self.0
            .format(&Rfc3339)
            .map_err(|err| AppError::invalid_data(err.to_string()))
    }

    pub fn date(&self) -> Date {
        self.0.date()
    }

    pub fn unix_timestamp_nanos(&self) -> i128 {
        self.0.unix_timestamp_nanos()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rendered = self.0.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&rendered)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(de::Error::custom)
    }
}

/// Parses a date-granularity value.
///
/// Accepts `YYYY-MM-DD`, and falls back to a full RFC3339 timestamp truncated
/// to its calendar date, since backup files written by older clients carry
/// full timestamps in the due-date field.
pub fn parse_date(value: &str) -> Result<Date, AppError> {
    if let Ok(date) = Date::parse(value, DATE_FORMAT) {
        return Ok(date);
    }
    OffsetDateTime::parse(value, &Rfc3339)
        .map(|datetime| datetime.date())
        .map_err(|_| AppError::invalid_data(format!("`{value}` is not a date")))
}

pub fn format_date(date: Date) -> Result<String, AppError> {
    date.format(DATE_FORMAT)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

/// Serde codec for optional date-granularity fields.
pub mod due_date {
    use super::{format_date, parse_date};
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{self, Serializer};
    use time::Date;

    pub fn serialize<S: Serializer>(
        value: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => {
                let rendered = format_date(*date).map_err(ser::Error::custom)?;
                serializer.serialize_some(&rendered)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_date(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}
