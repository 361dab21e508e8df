use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject, StringValidation};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

const MICROS_PER_SEC: i64 = 1_000_000;

/// Message timestamp with microsecond resolution.
///
/// Exports carry timestamps as fractional epoch seconds with exactly six
/// decimal places (`"1756191830.368749"`). Storing the integer microsecond
/// count keeps equality exact, which thread linking depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(MICROS_PER_SEC))
    }

    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// Whole seconds, truncated toward negative infinity.
    pub const fn secs(self) -> i64 {
        self.0.div_euclid(MICROS_PER_SEC)
    }

    pub const fn saturating_add_micros(self, micros: i64) -> Self {
        Self(self.0.saturating_add(micros))
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_micros(self.0)
    }

    /// Calendar day of this instant as observed in `tz`.
    pub fn day_in<Tz: TimeZone>(self, tz: &Tz) -> Option<NaiveDate> {
        self.to_datetime()
            .map(|value| value.with_timezone(tz).date_naive())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = MICROS_PER_SEC as u64;
        write!(f, "{sign}{}.{:06}", abs / unit, abs % unit)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDocument(format!("invalid timestamp '{value}'"));
        let (negative, body) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };
        let (secs, frac) = body.split_once('.').unwrap_or((body, ""));
        if secs.is_empty()
            || !secs.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let secs: i64 = secs.parse().map_err(|_| invalid())?;
        let mut micros = 0_i64;
        for (position, digit) in frac.bytes().take(6).enumerate() {
            micros += i64::from(digit - b'0') * 10_i64.pow(5 - position as u32);
        }
        let total = secs
            .checked_mul(MICROS_PER_SEC)
            .and_then(|value| value.checked_add(micros))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -total } else { total }))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl JsonSchema for Timestamp {
    fn schema_name() -> String {
        "Timestamp".to_string()
    }

    fn json_schema(_generator: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            string: Some(Box::new(StringValidation {
                pattern: Some(r"^-?[0-9]+\.[0-9]{6}$".to_string()),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into()
    }
}

/// Time zone used to cut the message stream into calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    /// Process-local time zone, matching what a person reading the export sees.
    #[default]
    Local,
    Utc,
}

impl DayBoundary {
    pub fn day_of(self, ts: Timestamp) -> Option<NaiveDate> {
        match self {
            DayBoundary::Local => ts.day_in(&Local),
            DayBoundary::Utc => ts.day_in(&Utc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_six_decimal_places() {
        let ts = Timestamp::from_micros(1_756_191_830_000_042);
        assert_eq!(ts.to_string(), "1756191830.000042");
        assert_eq!(Timestamp::from_secs(12).to_string(), "12.000000");
    }

    #[test]
    fn parses_short_and_long_fractions() {
        let ts: Timestamp = "1756191830.5".parse().expect("parse");
        assert_eq!(ts.as_micros(), 1_756_191_830_500_000);

        let ts: Timestamp = "1756191830.1234569".parse().expect("parse");
        assert_eq!(ts.as_micros(), 1_756_191_830_123_456);

        let ts: Timestamp = "42".parse().expect("parse");
        assert_eq!(ts, Timestamp::from_secs(42));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<Timestamp>().is_err());
        assert!("12.3a".parse::<Timestamp>().is_err());
        assert!(".5".parse::<Timestamp>().is_err());
        assert!("1e9".parse::<Timestamp>().is_err());
    }

    #[test]
    fn negative_values_round_trip() {
        let ts = Timestamp::from_micros(-500_000);
        assert_eq!(ts.to_string(), "-0.500000");
        assert_eq!("-0.500000".parse::<Timestamp>().expect("parse"), ts);
    }

    #[test]
    fn utc_day_boundary_truncates_to_midnight() {
        // 2024-03-10T23:59:59.999999Z
        let late = Timestamp::from_micros(1_710_115_199_999_999);
        let next = late.saturating_add_micros(1);
        assert_eq!(
            DayBoundary::Utc.day_of(late),
            NaiveDate::from_ymd_opt(2024, 3, 10)
        );
        assert_eq!(
            DayBoundary::Utc.day_of(next),
            NaiveDate::from_ymd_opt(2024, 3, 11)
        );
    }
}
