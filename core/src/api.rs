//! HTTP client for the efemérides API

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::EventRecord;
use crate::{Error, Result};

/// Base URL used when no configuration or environment override is present.
pub const DEFAULT_BASE_URL: &str = "http://10.0.2.2:8000";

/// Wire format of one event as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEvent {
    pub titulo: String,
    pub evento: String,
}

/// Client for `GET {base_url}/efemeride?fecha=YYYY-MM-DD`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the event for `date`. A single GET, no retry.
    pub fn fetch_event(&self, date: NaiveDate) -> Result<EventRecord> {
        let url = event_url(&self.base_url, date);
        let resp = self.http.get(&url).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        decode_events(status, &body, date)
    }
}

/// Build the query URL for `date` (zero-padded `YYYY-MM-DD`)
fn event_url(base_url: &str, date: NaiveDate) -> String {
    format!(
        "{}/efemeride?fecha={}",
        base_url.trim_end_matches('/'),
        date.format("%Y-%m-%d")
    )
}

/// Decode an API response into the event for `date`.
///
/// Non-2xx responses carry the status code and raw body verbatim; a 2xx
/// with an empty array means no event is recorded for that date.
fn decode_events(status: u16, body: &str, date: NaiveDate) -> Result<EventRecord> {
    if !(200..300).contains(&status) {
        return Err(Error::Server {
            status,
            body: body.to_string(),
        });
    }

    let events: Vec<ApiEvent> = serde_json::from_str(body)?;
    match events.into_iter().next() {
        Some(ev) => Ok(EventRecord::new(ev.titulo, ev.evento, date)),
        None => Err(Error::NoData),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_event_url_zero_pads_the_query_date() {
        assert_eq!(
            event_url("http://10.0.2.2:8000", date()),
            "http://10.0.2.2:8000/efemeride?fecha=2024-03-05"
        );
        // Trailing slash on the base URL does not double up
        assert_eq!(
            event_url("http://localhost:8000/", date()),
            "http://localhost:8000/efemeride?fecha=2024-03-05"
        );
    }

    #[test]
    fn test_decode_takes_the_first_event() {
        let body = r#"[{"titulo":"One","evento":"first"},{"titulo":"Two","evento":"second"}]"#;
        let record = decode_events(200, body, date()).unwrap();
        assert_eq!(record.title, "One");
        assert_eq!(record.body, "first");
        assert_eq!(record.date_display, "5/3/2024");
    }

    #[test]
    fn test_decode_empty_array_is_no_data() {
        match decode_events(200, "[]", date()) {
            Err(Error::NoData) => {}
            other => panic!("expected NoData, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_server_error_keeps_status_and_body() {
        match decode_events(500, "internal failure", date()) {
            Err(Error::Server { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal failure");
            }
            other => panic!("expected Server error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_malformed_body_is_a_parse_error() {
        match decode_events(200, "not json", date()) {
            Err(Error::Serialization(_)) => {}
            other => panic!("expected Serialization error, got {:?}", other),
        }
    }
}
