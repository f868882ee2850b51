use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_display_date, parse_display_date};

/// A historical event associated with a calendar date.
///
/// Serialized with the wire field names of the efemérides API
/// (`titulo` / `evento` / `fecha`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "evento")]
    pub body: String,
    /// Display date in `D/M/YYYY` form.
    #[serde(rename = "fecha")]
    pub date_display: String,
}

impl EventRecord {
    /// Create a new event record for `date`
    pub fn new(title: String, body: String, date: NaiveDate) -> Self {
        Self {
            title,
            body,
            date_display: format_display_date(date),
        }
    }

    /// Identity key used for favorite membership: title plus display date.
    pub fn key(&self) -> (&str, &str) {
        (self.title.as_str(), self.date_display.as_str())
    }

    /// The record's calendar date, if the display string parses.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_display_date(&self.date_display)
    }
}
