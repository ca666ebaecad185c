// Calendar core: normalization of CRM records into one timeline, windowing,
// grouping, navigation and view layouts.

pub mod dates;
pub mod grouping;
pub mod locale;
pub mod navigation;
pub mod normalize;
pub mod text;
pub mod views;
pub mod window;

pub use grouping::{group_by_calendar_cell, group_by_hour, CalendarCell};
pub use navigation::{
    range_label, select_event, Granularity, NavigationController, NavigationIntent, NavigationState, Screen,
};
pub use normalize::{normalize, normalize_snapshot};
pub use views::{day_view, month_view, render, week_view, DayLayout, MonthLayout, ViewLayout, WeekLayout};
pub use window::{by_day, by_month, by_week};
