use crate::search::SearchParameters;
use chrono::{FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("date cannot be empty")]
    Empty,
    #[error("invalid date: expected YYYY-M-D")]
    InvalidDate,
    #[error("invalid time zone offset: {0}")]
    InvalidOffset(i32),
}

/// Millisecond bounds of a search, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: i64,
    pub end: i64,
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn parse_search_date(input: &str) -> Result<NaiveDate, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| TimeParseError::InvalidDate)
}

pub fn offset_from_seconds(seconds: i32) -> Result<FixedOffset, TimeParseError> {
    FixedOffset::east_opt(seconds).ok_or(TimeParseError::InvalidOffset(seconds))
}

/// First millisecond of `date` in the given offset, as epoch milliseconds.
pub fn resolve_start_of_day(date: &str, offset_seconds: i32) -> Result<i64, TimeParseError> {
    let time = NaiveTime::from_hms_milli_opt(0, 0, 0, 0).ok_or(TimeParseError::InvalidDate)?;
    local_millis(date, time, offset_seconds)
}

/// Last millisecond of `date` in the given offset, as epoch milliseconds.
pub fn resolve_end_of_day(date: &str, offset_seconds: i32) -> Result<i64, TimeParseError> {
    let time =
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).ok_or(TimeParseError::InvalidDate)?;
    local_millis(date, time, offset_seconds)
}

/// Resolves a record's raw date bounds.
///
/// A missing or unparsable `from_date` means the epoch; a missing or unparsable
/// `to_date` means `now_ms`.
pub fn resolve_date_range(params: &SearchParameters, now_ms: i64) -> DateRange {
    let offset = params.time_zone_offset;
    let start = params
        .from_date
        .as_deref()
        .and_then(|date| resolve_start_of_day(date, offset).ok())
        .unwrap_or(0);
    let end = params
        .to_date
        .as_deref()
        .and_then(|date| resolve_end_of_day(date, offset).ok())
        .unwrap_or(now_ms);
    DateRange { start, end }
}

fn local_millis(date: &str, time: NaiveTime, offset_seconds: i32) -> Result<i64, TimeParseError> {
    let date = parse_search_date(date)?;
    // Offsets outside ±24h cannot be represented; treat them as UTC.
    let offset = offset_from_seconds(offset_seconds).unwrap_or_else(|_| Utc.fix());
    let local = offset
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(TimeParseError::InvalidDate)?;
    Ok(local.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{
        parse_search_date, resolve_date_range, resolve_end_of_day, resolve_start_of_day,
        DateRange, TimeParseError,
    };
    use crate::search::SearchParameters;
    use chrono::{NaiveDate, TimeZone, Utc};

    const DAY_MS: i64 = 86_400_000;

    fn utc_millis(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    #[test]
    fn parse_accepts_unpadded() {
        assert_eq!(
            parse_search_date("2024-1-5").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        assert_eq!(
            parse_search_date(" 2024-01-05 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_search_date(""), Err(TimeParseError::Empty));
        assert_eq!(parse_search_date("yesterday"), Err(TimeParseError::InvalidDate));
        assert_eq!(parse_search_date("2024-13-01"), Err(TimeParseError::InvalidDate));
        assert_eq!(parse_search_date("2023-2-29"), Err(TimeParseError::InvalidDate));
        assert_eq!(parse_search_date("2024-1"), Err(TimeParseError::InvalidDate));
        assert_eq!(parse_search_date("+2024-+1-+5"), Err(TimeParseError::InvalidDate));
    }

    #[test]
    fn day_bounds_in_utc() {
        let start = resolve_start_of_day("2024-3-10", 0).unwrap();
        let end = resolve_end_of_day("2024-3-10", 0).unwrap();
        assert_eq!(start, utc_millis(2024, 3, 10));
        assert_eq!(end, start + DAY_MS - 1);
    }

    #[test]
    fn day_bounds_east_of_utc() {
        // Midnight at UTC+2 is 22:00 the previous day in UTC.
        let start = resolve_start_of_day("2024-3-10", 7200).unwrap();
        assert_eq!(start, utc_millis(2024, 3, 10) - 7_200_000);
    }

    #[test]
    fn day_bounds_west_of_utc() {
        let end = resolve_end_of_day("2024-3-10", -18_000).unwrap();
        assert_eq!(end, utc_millis(2024, 3, 11) + 18_000_000 - 1);
    }

    #[test]
    fn out_of_range_offset_is_utc() {
        assert_eq!(
            resolve_start_of_day("2024-3-10", 1_000_000).unwrap(),
            utc_millis(2024, 3, 10)
        );
    }

    #[test]
    fn range_falls_back_to_epoch_and_now() {
        let params = SearchParameters {
            from_date: Some("soon".to_string()),
            to_date: Some("later".to_string()),
            ..SearchParameters::default()
        };
        assert_eq!(
            resolve_date_range(&params, 42),
            DateRange { start: 0, end: 42 }
        );
        assert_eq!(
            resolve_date_range(&SearchParameters::default(), 42),
            DateRange { start: 0, end: 42 }
        );
    }

    #[test]
    fn range_uses_record_offset() {
        let params = SearchParameters {
            from_date: Some("2024-1-1".to_string()),
            to_date: Some("2024-1-1".to_string()),
            time_zone_offset: 3600,
            ..SearchParameters::default()
        };
        let range = resolve_date_range(&params, 0);
        assert_eq!(range.start, utc_millis(2024, 1, 1) - 3_600_000);
        assert_eq!(range.end, range.start + DAY_MS - 1);
    }
}
