//! Bucketing for the day and month views.

use super::dates::{local_date, month_grid};
use crate::models::CalendarEvent;
use chrono::{Datelike, NaiveDate, Timelike};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// "00:00" through "23:00".
pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour)
}

/// Buckets events by local hour of day. Hours with no events have no entry;
/// each bucket keeps the input order.
pub fn group_by_hour<'a, I>(events: I, tz: Tz) -> BTreeMap<String, Vec<&'a CalendarEvent>>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut buckets: BTreeMap<String, Vec<&'a CalendarEvent>> = BTreeMap::new();
    for event in events {
        let hour = event.timestamp.with_timezone(&tz).hour();
        buckets.entry(hour_label(hour)).or_default().push(event);
    }
    buckets
}

/// One date of the month grid with every event that falls on it.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub events: Vec<&'a CalendarEvent>,
}

/// Lays events onto the month grid around `anchor` (complete weeks, Sunday
/// first). Cells hold the full list; capping is left to the renderer.
pub fn group_by_calendar_cell<'a, I>(events: I, anchor: NaiveDate, tz: Tz) -> Vec<CalendarCell<'a>>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut by_date: BTreeMap<NaiveDate, Vec<&'a CalendarEvent>> = BTreeMap::new();
    for event in events {
        by_date
            .entry(local_date(&event.timestamp, tz))
            .or_default()
            .push(event);
    }

    month_grid(anchor)
        .into_iter()
        .map(|date| CalendarCell {
            date,
            in_current_month: date.month() == anchor.month() && date.year() == anchor.year(),
            events: by_date.remove(&date).unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventDetails;
    use chrono::{TimeZone, Utc};

    const UTC: Tz = chrono_tz::UTC;

    fn at(id: i64, m: u32, d: u32, h: u32) -> CalendarEvent {
        CalendarEvent {
            title: format!("e{}", id),
            timestamp: Utc.with_ymd_and_hms(2025, m, d, h, 30, 0).unwrap(),
            client: None,
            user: None,
            description: None,
            details: EventDetails::Event { source_id: id },
        }
    }

    #[test]
    fn test_hour_labels_are_zero_padded() {
        assert_eq!(hour_label(0), "00:00");
        assert_eq!(hour_label(9), "09:00");
        assert_eq!(hour_label(23), "23:00");
    }

    #[test]
    fn test_group_by_hour_keeps_everything() {
        let events = vec![at(1, 3, 25, 9), at(2, 3, 25, 14), at(3, 3, 25, 9), at(4, 3, 25, 0)];
        let groups = group_by_hour(&events, UTC);

        assert_eq!(groups.len(), 3);
        let nine: Vec<i64> = groups["09:00"].iter().map(|e| e.details.source_id()).collect();
        assert_eq!(nine, vec![1, 3]);
        assert!(!groups.contains_key("10:00"));
        assert_eq!(groups.values().map(Vec::len).sum::<usize>(), events.len());
        assert_eq!(groups.keys().next().map(String::as_str), Some("00:00"));
    }

    #[test]
    fn test_group_by_calendar_cell() {
        let anchor = NaiveDate::from_ymd_opt(2025, 4, 15).unwrap();
        let events = vec![at(1, 3, 30, 10), at(2, 4, 15, 8), at(3, 4, 15, 9), at(4, 5, 3, 1), at(5, 5, 4, 1)];

        let cells = group_by_calendar_cell(&events, anchor, UTC);

        assert_eq!(cells.len(), 35);
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2025, 3, 30).unwrap());
        assert!(!cells[0].in_current_month);
        assert_eq!(cells[0].events.len(), 1);

        let mid = cells.iter().find(|c| c.date == anchor).unwrap();
        assert!(mid.in_current_month);
        assert_eq!(mid.events.len(), 2);

        let last = cells.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2025, 5, 3).unwrap());
        assert_eq!(last.events.len(), 1);

        // May 4th is outside the grid
        let placed: usize = cells.iter().map(|c| c.events.len()).sum();
        assert_eq!(placed, 4);
    }
}
