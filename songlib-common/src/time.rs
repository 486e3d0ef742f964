//! Release date utilities

use chrono::{Local, NaiveDate};

/// Release dates are stored as `DD.MM.YYYY` text
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Format a calendar date as a release date string
pub fn format_release_date(date: NaiveDate) -> String {
    date.format(RELEASE_DATE_FORMAT).to_string()
}

/// Today's local date in release date format
pub fn today_release_date() -> String {
    format_release_date(Local::now().date_naive())
}
