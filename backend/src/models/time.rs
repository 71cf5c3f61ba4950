use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::*;

use crate::error::{SkyError, SkyResult};

/// Julian Date of the Unix epoch (1970-01-01 00:00:00 UTC).
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of the J2000.0 reference epoch.
pub const J2000_JD: f64 = 2_451_545.0;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Naive layouts interpreted as UTC. `%.f` also matches an absent fraction.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Julian Date representation.
/// JD 2440587.5 = 1970-01-01 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(qtty::Days);

impl JulianDate {
    /// Create a new JD value.
    pub fn new<V: Into<qtty::Days>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.value() - UNIX_EPOCH_JD) * SECONDS_PER_DAY
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self::new(timestamp / SECONDS_PER_DAY + UNIX_EPOCH_JD)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_unix_timestamp(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// Days elapsed since J2000.0.
    pub fn days_since_j2000(&self) -> f64 {
        self.value() - J2000_JD
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_JULIAN_CENTURY
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

/// A parsed UTC point in time.
///
/// Parsing happens once per request; every transform reads the Julian Date
/// cached here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instant {
    datetime: DateTime<Utc>,
    julian_date: JulianDate,
}

impl Instant {
    /// Parse an ISO-8601 or `YYYY-MM-DD HH:MM:SS` string.
    ///
    /// Strings with an explicit offset are converted to UTC; naive strings are
    /// taken as UTC. A bare date means midnight.
    pub fn parse(input: &str) -> SkyResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SkyError::Parse("empty datetime string".to_string()));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Ok(Self::from_datetime(dt.with_timezone(&Utc)));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self::from_datetime(naive.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self::from_datetime(midnight.and_utc()));
            }
        }

        Err(SkyError::Parse(format!(
            "'{}' is neither ISO-8601 nor 'YYYY-MM-DD HH:MM:SS'",
            input
        )))
    }

    /// Wrap an already-known UTC datetime.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self {
            datetime,
            julian_date: JulianDate::from_datetime(datetime),
        }
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.datetime
    }

    pub fn julian_date(&self) -> JulianDate {
        self.julian_date
    }
}

impl std::str::FromStr for Instant {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Instant::parse(s)
    }
}
