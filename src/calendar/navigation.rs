//! Anchor-date navigation, range labels and navigation intents.

use super::dates::{add_months, today, week_end, week_start};
use super::locale::{month_name, weekday_name};
use crate::error::AppError;
use crate::models::{CalendarEvent, EventDetails};
use chrono::{Datelike, Duration, NaiveDate};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl Granularity {
    pub fn as_key(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }
}

impl FromStr for Granularity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(AppError::invalid_input(format!("Unknown view '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    pub anchor: NaiveDate,
    pub granularity: Granularity,
}

/// Owns the anchor date and granularity; the only way they change.
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    tz: Tz,
}

impl NavigationController {
    pub fn new(anchor: NaiveDate, granularity: Granularity, tz: Tz) -> Self {
        Self {
            state: NavigationState { anchor, granularity },
            tz,
        }
    }

    pub fn starting_today(granularity: Granularity, tz: Tz) -> Self {
        Self::new(today(tz), granularity, tz)
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn anchor(&self) -> NaiveDate {
        self.state.anchor
    }

    pub fn granularity(&self) -> Granularity {
        self.state.granularity
    }

    pub fn today(&mut self) {
        self.state.anchor = today(self.tz);
    }

    pub fn next(&mut self) -> NaiveDate {
        self.step(1)
    }

    pub fn previous(&mut self) -> NaiveDate {
        self.step(-1)
    }

    fn step(&mut self, direction: i32) -> NaiveDate {
        let anchor = self.state.anchor;
        self.state.anchor = match self.state.granularity {
            Granularity::Day => anchor + Duration::days(i64::from(direction)),
            Granularity::Week => anchor + Duration::days(7 * i64::from(direction)),
            Granularity::Month => add_months(anchor, direction),
        };
        debug!(
            "Calendar moved {} -> {} ({})",
            anchor,
            self.state.anchor,
            self.state.granularity.as_key()
        );
        self.state.anchor
    }

    /// Changes the view; the anchor stays put.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.state.granularity = granularity;
    }

    /// Month-cell selection: focus `date` in the day view.
    pub fn open_day(&mut self, date: NaiveDate) {
        self.state = NavigationState {
            anchor: date,
            granularity: Granularity::Day,
        };
    }

    pub fn label(&self) -> String {
        range_label(self.state.anchor, self.state.granularity)
    }
}

/// Human-readable range for the window around `anchor`.
pub fn range_label(anchor: NaiveDate, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => format!(
            "{}, {} de {} de {}",
            weekday_name(anchor.weekday()),
            anchor.day(),
            month_name(anchor),
            anchor.year()
        ),
        Granularity::Week => week_label(week_start(anchor), week_end(anchor)),
        Granularity::Month => format!("{} de {}", month_name(anchor), anchor.year()),
    }
}

fn week_label(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() != end.year() {
        format!(
            "{} de {} de {} – {} de {} de {}",
            start.day(),
            month_name(start),
            start.year(),
            end.day(),
            month_name(end),
            end.year()
        )
    } else if start.month() != end.month() {
        format!(
            "{} de {} – {} de {} de {}",
            start.day(),
            month_name(start),
            end.day(),
            month_name(end),
            end.year()
        )
    } else {
        format!("{} – {} de {} de {}", start.day(), end.day(), month_name(end), end.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Task,
    FollowUp,
    Note,
    Event,
}

impl Screen {
    fn segment(&self) -> &'static str {
        match self {
            Screen::Task => "tasks",
            Screen::FollowUp => "follow-ups",
            Screen::Note => "notes",
            Screen::Event => "events",
        }
    }
}

/// Request for the application shell to open a record's screen. The calendar
/// never routes by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    pub screen: Screen,
    pub entity_id: i64,
}

impl NavigationIntent {
    pub fn path(&self) -> String {
        format!("/{}/{}", self.screen.segment(), self.entity_id)
    }
}

pub fn select_event(event: &CalendarEvent) -> NavigationIntent {
    let screen = match event.details {
        EventDetails::Task { .. } => Screen::Task,
        EventDetails::FollowUp { .. } => Screen::FollowUp,
        EventDetails::Note { .. } => Screen::Note,
        EventDetails::Event { .. } => Screen::Event,
    };
    NavigationIntent {
        screen,
        entity_id: event.details.source_id(),
    }
}
