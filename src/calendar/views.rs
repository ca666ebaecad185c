//! Day, week and month layouts. These are plain data derived from the
//! timeline and the navigation state; drawing them is up to the caller.

use super::dates::{local_date, week_start};
use super::grouping::{group_by_calendar_cell, group_by_hour, hour_label};
use super::locale::{weekday_headers, weekday_short};
use super::navigation::{Granularity, NavigationState};
use super::window::{by_day, by_week};
use crate::models::CalendarEvent;
use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;

/// Events shown per month cell before the "+N más" counter takes over.
pub const MONTH_CELL_LIMIT: usize = 3;

pub const EMPTY_DAY_MESSAGE: &str = "Sin actividad para este día";
pub const EMPTY_WEEK_MESSAGE: &str = "Sin actividad esta semana";

/// Shared emptiness test for the day and week windows.
pub fn is_empty_window(window: &[&CalendarEvent]) -> bool {
    window.is_empty()
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourRow<'a> {
    pub label: String,
    /// Empty for an hour without activity (rendered as a placeholder).
    pub events: Vec<&'a CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayLayout<'a> {
    Empty,
    Hours(Vec<HourRow<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayTab<'a> {
    pub date: NaiveDate,
    pub label: &'static str,
    pub events: Vec<&'a CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeekLayout<'a> {
    Empty,
    Days(Vec<DayTab<'a>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell<'a> {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub visible: Vec<&'a CalendarEvent>,
    pub overflow: usize,
}

impl MonthCell<'_> {
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} más", self.overflow))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout<'a> {
    pub headers: [&'static str; 7],
    pub weeks: Vec<Vec<MonthCell<'a>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewLayout<'a> {
    Day(DayLayout<'a>),
    Week(WeekLayout<'a>),
    Month(MonthLayout<'a>),
}

/// Lays out whichever view `state` selects.
pub fn render<'a>(events: &'a [CalendarEvent], state: NavigationState, tz: Tz) -> ViewLayout<'a> {
    match state.granularity {
        Granularity::Day => ViewLayout::Day(day_view(events, state.anchor, tz)),
        Granularity::Week => ViewLayout::Week(week_view(events, state.anchor, tz)),
        Granularity::Month => ViewLayout::Month(month_view(events, state.anchor, tz)),
    }
}

/// 24 hourly rows for `anchor`, or [`DayLayout::Empty`] when nothing falls on it.
pub fn day_view<'a>(events: &'a [CalendarEvent], anchor: NaiveDate, tz: Tz) -> DayLayout<'a> {
    let window = by_day(events, anchor, tz);
    if is_empty_window(&window) {
        return DayLayout::Empty;
    }

    let mut groups = group_by_hour(window, tz);
    let rows = (0..24)
        .map(|hour| {
            let label = hour_label(hour);
            let events = groups.remove(&label).unwrap_or_default();
            HourRow { label, events }
        })
        .collect();
    DayLayout::Hours(rows)
}

/// One tab per day, Sunday first, each in timestamp order.
pub fn week_view<'a>(events: &'a [CalendarEvent], anchor: NaiveDate, tz: Tz) -> WeekLayout<'a> {
    let window = by_week(events, anchor, tz);
    if is_empty_window(&window) {
        return WeekLayout::Empty;
    }

    let start = week_start(anchor);
    let tabs = (0..7)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let mut day_events: Vec<&CalendarEvent> = window
                .iter()
                .copied()
                .filter(|e| local_date(&e.timestamp, tz) == date)
                .collect();
            day_events.sort_by_key(|e| e.timestamp);
            DayTab {
                date,
                label: weekday_short(date.weekday()),
                events: day_events,
            }
        })
        .collect();
    WeekLayout::Days(tabs)
}

/// Grid of complete weeks. Every cell keeps its events; only the first
/// [`MONTH_CELL_LIMIT`] are visible.
pub fn month_view<'a>(events: &'a [CalendarEvent], anchor: NaiveDate, tz: Tz) -> MonthLayout<'a> {
    // Leading and trailing days belong to neighbouring months, so the whole
    // timeline is bucketed rather than just `by_month`.
    let cells: Vec<MonthCell<'a>> = group_by_calendar_cell(events, anchor, tz)
        .into_iter()
        .map(|cell| {
            let overflow = cell.events.len().saturating_sub(MONTH_CELL_LIMIT);
            let mut visible = cell.events;
            visible.truncate(MONTH_CELL_LIMIT);
            MonthCell {
                date: cell.date,
                in_current_month: cell.in_current_month,
                visible,
                overflow,
            }
        })
        .collect();

    let weeks = cells.chunks(7).map(<[MonthCell]>::to_vec).collect();
    MonthLayout {
        headers: weekday_headers(),
        weeks,
    }
}
