use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Utc};

/// Naive timestamp layouts accepted for stored timestamps, interpreted as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Layout used by Postgres-style exports (`2024-05-01 10:00:00.123+00`).
const OFFSET_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored timestamp into an absolute instant.
///
/// Accepts RFC 3339, space-separated timestamps with an offset, naive
/// timestamps (read as UTC) and bare calendar dates (UTC midnight).
/// Returns `None` for anything else.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, OFFSET_DATETIME_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar day (UTC) of a stored timestamp, or `None` when it does not parse.
pub fn utc_day_of(raw: &str) -> Option<NaiveDate> {
    parse_timestamp(raw).map(|instant| instant.date_naive())
}

/// Calendar day of a date-like value in the local calendar.
///
/// A bare `YYYY-MM-DD` is taken as-is. Full timestamps are converted to the
/// process' local timezone before truncating to the day.
pub fn local_day_of(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    parse_timestamp(raw).map(|instant| instant.with_timezone(&Local).date_naive())
}

/// Today's date in the process' local calendar.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        if let Some(next) = current.succ_opt() {
            current = next;
        } else {
            break;
        }
    }
    days
}

/// The `days` consecutive calendar days ending at `end` (inclusive), oldest first.
pub fn window_ending_at(end: NaiveDate, days: u32) -> Vec<NaiveDate> {
    if days == 0 {
        return Vec::new();
    }
    let start = end
        .checked_sub_signed(Duration::days(i64::from(days) - 1))
        .unwrap_or(NaiveDate::MIN);
    get_days_between(start, end)
}
