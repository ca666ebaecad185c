// Plain-text rendering of view layouts, used by the command-line binary.

use super::views::{DayLayout, MonthLayout, ViewLayout, WeekLayout, EMPTY_DAY_MESSAGE, EMPTY_WEEK_MESSAGE};
use crate::models::CalendarEvent;
use chrono::Datelike;
use chrono_tz::Tz;
use std::fmt::Write;

const PLACEHOLDER: &str = "– – –";

pub fn render_text(layout: &ViewLayout<'_>, tz: Tz) -> String {
    match layout {
        ViewLayout::Day(day) => day_text(day, tz),
        ViewLayout::Week(week) => week_text(week, tz),
        ViewLayout::Month(month) => month_text(month),
    }
}

pub fn event_line(event: &CalendarEvent, tz: Tz) -> String {
    let mut line = format!(
        "{} {} [{}]",
        event.timestamp.with_timezone(&tz).format("%H:%M"),
        event.title,
        event.kind()
    );
    if let Some(status) = event.status() {
        let _ = write!(line, " ({})", status.as_str());
    }
    if let Some(client) = &event.client {
        let _ = write!(line, " · {}", client.name);
    }
    line
}

fn day_text(day: &DayLayout<'_>, tz: Tz) -> String {
    let DayLayout::Hours(rows) = day else {
        return format!("{}\n", EMPTY_DAY_MESSAGE);
    };

    let mut out = String::new();
    for row in rows {
        if row.events.is_empty() {
            let _ = writeln!(out, "{}  {}", row.label, PLACEHOLDER);
            continue;
        }
        for event in &row.events {
            let _ = writeln!(out, "{}  {}", row.label, event_line(event, tz));
        }
    }
    out
}

fn week_text(week: &WeekLayout<'_>, tz: Tz) -> String {
    let WeekLayout::Days(tabs) = week else {
        return format!("{}\n", EMPTY_WEEK_MESSAGE);
    };

    let mut out = String::new();
    for tab in tabs {
        let _ = writeln!(out, "{} {}", tab.label, tab.date.day());
        if tab.events.is_empty() {
            let _ = writeln!(out, "  {}", PLACEHOLDER);
        }
        for event in &tab.events {
            let _ = writeln!(out, "  {}", event_line(event, tz));
        }
    }
    out
}

fn month_text(month: &MonthLayout<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", month.headers.map(|h| format!("{:<8}", h)).concat().trim_end());

    for week in &month.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| {
                let day = if cell.in_current_month {
                    format!("{:>2}", cell.date.day())
                } else {
                    format!("({})", cell.date.day())
                };
                let count = cell.visible.len() + cell.overflow;
                let mark = if count > 0 { format!("•{}", count) } else { String::new() };
                format!("{:<8}", format!("{}{}", day, mark))
            })
            .collect();
        let _ = writeln!(out, "{}", cells.concat().trim_end());

        for cell in week.iter().filter(|c| !c.visible.is_empty()) {
            let titles: Vec<&str> = cell.visible.iter().map(|e| e.title.as_str()).collect();
            let _ = write!(out, "  {:>2}: {}", cell.date.day(), titles.join(", "));
            if let Some(more) = cell.overflow_label() {
                let _ = write!(out, " {}", more);
            }
            out.push('\n');
        }
    }
    out
}
