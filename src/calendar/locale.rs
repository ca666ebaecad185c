// Spanish calendar vocabulary used by labels and view headers.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTHS: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

// Indexed from Sunday.
const WEEKDAYS: [&str; 7] = ["domingo", "lunes", "martes", "miércoles", "jueves", "viernes", "sábado"];
const WEEKDAYS_SHORT: [&str; 7] = ["dom", "lun", "mar", "mié", "jue", "vie", "sáb"];

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_sunday() as usize]
}

pub fn weekday_short(weekday: Weekday) -> &'static str {
    WEEKDAYS_SHORT[weekday.num_days_from_sunday() as usize]
}

/// Column headers for a Sunday-first grid.
pub fn weekday_headers() -> [&'static str; 7] {
    WEEKDAYS_SHORT
}
