//! Remaining-time decomposition.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CountdownError;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// Đơn vị thời gian hiển thị, theo thứ tự trình bày.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
    ];

    /// Unit key as understood by `Intl.RelativeTimeFormat`.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Day => "day",
            TimeUnit::Hour => "hour",
            TimeUnit::Minute => "minute",
            TimeUnit::Second => "second",
        }
    }
}

/// Time left until the end instant, split into display fields.
///
/// Every field is derived from the same signed `total`, so once the end
/// instant has passed the fields go negative independently of each other
/// and are not clamped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRemaining {
    /// Milliseconds until the end instant; negative after expiry.
    pub total: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
}

impl TimeRemaining {
    /// Decompose `end - now`, both given as epoch milliseconds.
    pub fn between(end_ms: i64, now_ms: i64) -> Self {
        let total = end_ms.saturating_sub(now_ms);
        let ms = total as f64;
        Self {
            total,
            day: (ms / MS_PER_DAY).floor() as i64,
            hour: ((ms / MS_PER_HOUR) % 24.0).floor() as i64,
            minute: ((ms / MS_PER_SECOND / 60.0) % 60.0).floor() as i64,
            second: ((ms / MS_PER_SECOND) % 60.0).floor() as i64,
        }
    }

    pub fn until(end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self::between(end.timestamp_millis(), now.timestamp_millis())
    }

    pub fn is_expired(&self) -> bool {
        self.total <= 0
    }

    pub fn get(&self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Day => self.day,
            TimeUnit::Hour => self.hour,
            TimeUnit::Minute => self.minute,
            TimeUnit::Second => self.second,
        }
    }

    /// The four display fields in rendering order.
    pub fn fields(&self) -> [(TimeUnit, i64); 4] {
        TimeUnit::ALL.map(|unit| (unit, self.get(unit)))
    }
}

/// Parse an `ends` value outside the browser.
///
/// Accepts RFC 3339 plus offset-less date-times and bare dates, both taken
/// as UTC.
pub fn parse_end_instant(raw: &str) -> Result<DateTime<Utc>, CountdownError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CountdownError::InvalidEndInstant(raw.to_string()))
}

/// [`parse_end_instant`] as epoch milliseconds, for [`crate::Countdown`].
pub fn parse_end_ms(raw: &str) -> Option<i64> {
    parse_end_instant(raw).ok().map(|end| end.timestamp_millis())
}
