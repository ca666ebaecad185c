//! Day, week and month selections over a normalized timeline.
//!
//! Each filter borrows from the input and keeps its order; an anchor with no
//! matching events yields an empty vector.

use super::dates::{local_date, week_end, week_start};
use crate::models::CalendarEvent;
use chrono::{Datelike, NaiveDate};
use chrono_tz::Tz;

pub fn by_day(events: &[CalendarEvent], date: NaiveDate, tz: Tz) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|e| local_date(&e.timestamp, tz) == date)
        .collect()
}

/// Sunday through Saturday of the week containing `date`, both days inclusive.
pub fn by_week(events: &[CalendarEvent], date: NaiveDate, tz: Tz) -> Vec<&CalendarEvent> {
    let start = week_start(date);
    let end = week_end(date);
    events
        .iter()
        .filter(|e| {
            let day = local_date(&e.timestamp, tz);
            start <= day && day <= end
        })
        .collect()
}

pub fn by_month(events: &[CalendarEvent], date: NaiveDate, tz: Tz) -> Vec<&CalendarEvent> {
    events
        .iter()
        .filter(|e| {
            let day = local_date(&e.timestamp, tz);
            day.year() == date.year() && day.month() == date.month()
        })
        .collect()
}
