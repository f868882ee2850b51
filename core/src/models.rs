mod event;

pub use event::EventRecord;

use chrono::{Datelike, NaiveDate};

/// Parse a `D/M/YYYY` display string into a date.
pub fn parse_display_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.splitn(3, '/');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date as `D/M/YYYY`, without zero padding.
pub fn format_display_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}
