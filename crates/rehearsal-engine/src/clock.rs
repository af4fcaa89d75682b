//! Same-day wall-clock times and half-open time ranges.
//!
//! Bookings never cross midnight, so a time of day (`NaiveTime`) plus the
//! reservation's calendar date is all the engine needs. Times travel as
//! zero-padded `HH:MM` strings; the [`hhmm`] and [`hhmm_opt`] modules plug that
//! format into serde.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Wire format for wall-clock times.
pub const WALL_CLOCK_FORMAT: &str = "%H:%M";

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an `HH:MM` string. A trailing `:SS` is tolerated since some time
/// pickers emit it.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, WALL_CLOCK_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(s.to_string()))
}

pub fn format_time(t: NaiveTime) -> String {
    t.format(WALL_CLOCK_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| EngineError::InvalidDate(s.to_string()))
}

/// End of the fixed one-hour slot that starts at `start`.
///
/// The quick booking flow picks whole hours, so the end is the next full hour
/// after the start hour: `14:00 -> 15:00`, `09:30 -> 10:00`. There is no day
/// rollover: a start in the 23:00 hour is rejected with
/// [`EngineError::EndTimeOverflow`] instead of producing `24:00` or `00:00`.
pub fn default_end_time(start: NaiveTime) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(start.hour() + 1, 0, 0)
        .ok_or_else(|| EngineError::EndTimeOverflow(format_time(start)))
}

/// A half-open interval `[start, end)` within one day.
///
/// A range ending at 16:00 does not contain 16:00, so back-to-back bookings
/// never conflict. `start < end` is checked on construction and when reading
/// JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

#[derive(Deserialize)]
struct RawRange {
    #[serde(with = "hhmm")]
    start: NaiveTime,
    #[serde(with = "hhmm")]
    end: NaiveTime,
}

impl TryFrom<RawRange> for TimeRange {
    type Error = EngineError;

    fn try_from(raw: RawRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// Build a range, rejecting empty or inverted intervals.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidRange {
                start: format_time(start),
                end: format_time(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    /// The quick-flow slot: `start` up to [`default_end_time`].
    pub fn one_hour_from(start: NaiveTime) -> Result<Self> {
        Self::new(start, default_end_time(start)?)
    }

    pub fn contains(&self, t: NaiveTime) -> bool {
        self.start <= t && t < self.end
    }

    /// Two ranges overlap iff `a.start < b.end && b.start < a.end`.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Serde adapter for `NaiveTime` as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_time(*t))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `Option<NaiveTime>`. Blank strings read as `None`, which is
/// what an untouched form field sends.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_some(&super::format_time(*t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => super::parse_time(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    #[test]
    fn default_end_is_next_full_hour() {
        assert_eq!(format_time(default_end_time(t("09:00")).unwrap()), "10:00");
        assert_eq!(format_time(default_end_time(t("14:00")).unwrap()), "15:00");
        assert_eq!(format_time(default_end_time(t("00:00")).unwrap()), "01:00");
        assert_eq!(format_time(default_end_time(t("22:00")).unwrap()), "23:00");
    }

    #[test]
    fn default_end_drops_start_minutes() {
        assert_eq!(format_time(default_end_time(t("14:30")).unwrap()), "15:00");
    }

    #[test]
    fn default_end_rejects_last_hour_of_day() {
        assert_eq!(
            default_end_time(t("23:00")),
            Err(EngineError::EndTimeOverflow("23:00".to_string()))
        );
        assert!(default_end_time(t("23:59")).is_err());
    }

    #[test]
    fn parse_time_accepts_seconds_suffix() {
        assert_eq!(t("14:00:00"), t("14:00"));
        assert_eq!(t(" 08:15 "), t("08:15"));
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert!(matches!(parse_time("2pm"), Err(EngineError::InvalidTime(_))));
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("").is_err());
    }

    #[test]
    fn range_rejects_empty_and_inverted() {
        assert!(TimeRange::parse("10:00", "10:00").is_err());
        assert!(TimeRange::parse("11:00", "10:00").is_err());
        assert!(TimeRange::parse("10:00", "10:01").is_ok());
    }

    #[test]
    fn range_is_half_open() {
        let r = TimeRange::parse("14:00", "15:00").unwrap();
        assert!(r.contains(t("14:00")));
        assert!(r.contains(t("14:59")));
        assert!(!r.contains(t("15:00")));
        assert!(!r.contains(t("13:59")));
    }

    #[test]
    fn adjacent_ranges_do_not_overlap() {
        let a = TimeRange::parse("14:00", "15:00").unwrap();
        let b = TimeRange::parse("15:00", "16:00").unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert_eq!(a.duration_minutes(), 60);
    }

    #[test]
    fn range_json_is_checked() {
        let ok: TimeRange = serde_json::from_str(r#"{"start":"10:00","end":"11:30"}"#).unwrap();
        assert_eq!(ok, TimeRange::parse("10:00", "11:30").unwrap());

        let inverted = serde_json::from_str::<TimeRange>(r#"{"start":"15:00","end":"14:00"}"#);
        assert!(inverted.unwrap_err().to_string().contains("15:00 is not before 14:00"));
        assert!(serde_json::from_str::<TimeRange>(r#"{"start":"14:00","end":"14:00"}"#).is_err());
    }

    #[test]
    fn parse_date_uses_iso_format() {
        assert_eq!(
            parse_date("2026-03-16").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
        );
        assert!(matches!(parse_date("16/03/2026"), Err(EngineError::InvalidDate(_))));
    }
}
