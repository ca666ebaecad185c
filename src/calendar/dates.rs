//! Date parsing and calendar arithmetic shared by the windows, grouping and
//! navigation code. All calendar dates are taken in the configured zone.

use crate::error::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a backend date string into an absolute instant.
///
/// Accepts RFC 3339 with an offset, naive date-times (read as wall-clock time
/// in `tz`) and bare dates (local midnight).
pub fn parse_timestamp(raw: &str, tz: Tz) -> AppResult<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::invalid_date("empty date string"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return localize(naive, tz, raw);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return localize(date.and_time(NaiveTime::MIN), tz, raw);
    }

    Err(AppError::invalid_date(format!("unrecognised date '{}'", raw)))
}

fn localize(naive: NaiveDateTime, tz: Tz, raw: &str) -> AppResult<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| AppError::invalid_date(format!("'{}' does not exist in {}", raw, tz)))
}

pub fn local_date(timestamp: &DateTime<Utc>, tz: Tz) -> NaiveDate {
    timestamp.with_timezone(&tz).date_naive()
}

pub fn today(tz: Tz) -> NaiveDate {
    local_date(&Utc::now(), tz)
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Saturday on or after `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Calendar-month step; the day clamps to the end of shorter months.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Every date shown by a month grid: complete weeks from the Sunday on or
/// before the 1st through the Saturday on or after the last day.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let start = week_start(first_of_month(anchor));
    let end = week_end(last_of_month(anchor));
    start.iter_days().take_while(|day| *day <= end).collect()
}
