//! Timestamp parsing and timezone helpers.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{SocialCalError, SocialCalResult};

/// Naive formats accepted for timestamps without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp. RFC 3339 input keeps its offset; anything else is read
/// as wall-clock time in `tz`. A bare date means local midnight.
pub fn parse_timestamp(s: &str, tz: Tz) -> SocialCalResult<DateTime<Utc>> {
    let s = s.trim();
    let invalid = || SocialCalError::InvalidTimestamp(s.to_string());

    if s.is_empty() {
        return Err(invalid());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;

    local_to_utc(naive, tz).ok_or_else(invalid)
}

/// Resolve a wall-clock time in `tz`. Ambiguous times take the earlier
/// instant; times skipped by a DST jump have no answer.
pub fn local_to_utc(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Build a UTC instant from local calendar fields, for seed data and the
/// horizon. A time skipped by a DST jump moves forward by the jump, so only
/// invalid fields give `None`.
pub fn local_ymd_hm(tz: Tz, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
    local_to_utc(naive, tz).or_else(|| local_to_utc(naive + Duration::hours(1), tz))
}

/// Jan 1 00:00 of the year after `now`, in `tz`. Recurrences are expanded
/// up to (not including) this instant.
pub fn end_of_year_horizon(now: DateTime<Utc>, tz: Tz) -> SocialCalResult<DateTime<Utc>> {
    let next_year = now.with_timezone(&tz).year() + 1;
    local_ymd_hm(tz, next_year, 1, 1, 0, 0)
        .ok_or_else(|| SocialCalError::InvalidTimestamp(format!("{next_year}-01-01T00:00")))
}

/// Parse an IANA timezone name.
pub fn parse_tz(name: &str) -> SocialCalResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| SocialCalError::Config(format!("Unknown timezone '{}'", name)))
}

/// The system timezone, falling back to UTC when it cannot be determined.
pub fn system_tz() -> Tz {
    iana_time_zone::get_timezone()
        .ok()
        .and_then(|name| name.parse::<Tz>().ok())
        .unwrap_or(Tz::UTC)
}
