use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use chrono::NaiveDate;
use efem_core::api::ApiClient;
use efem_core::models::EventRecord;

/// Result of one background fetch, tagged with the request token that
/// started it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub token: u64,
    pub date: NaiveDate,
    pub result: efem_core::Result<EventRecord>,
}

/// Runs fetches on background threads and hands results back over a
/// channel.
///
/// Requests are never cancelled; each one gets a monotonically increasing
/// token and the receiver decides whether an outcome still matters when it
/// arrives.
pub struct Fetcher {
    client: ApiClient,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    latest_token: u64,
}

impl Fetcher {
    pub fn new(client: ApiClient) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client,
            tx,
            rx,
            latest_token: 0,
        }
    }

    /// Start a fetch for `date`, superseding any in-flight request.
    /// Returns the request's token.
    pub fn request(&mut self, date: NaiveDate) -> u64 {
        self.latest_token += 1;
        let token = self.latest_token;
        let client = self.client.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = client.fetch_event(date);
            // The receiver may be gone if the app is shutting down
            let _ = tx.send(FetchOutcome {
                token,
                date,
                result,
            });
        });
        token
    }

    /// Non-blocking poll for a finished fetch
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_tokens_increase_per_request() {
        // Port 1 refuses connections immediately, so the workers finish fast
        let mut fetcher = Fetcher::new(ApiClient::new("http://127.0.0.1:1"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        assert_eq!(fetcher.request(date), 1);
        assert_eq!(fetcher.request(date), 2);
    }

    #[test]
    fn test_outcome_arrives_with_its_token() {
        let mut fetcher = Fetcher::new(ApiClient::new("http://127.0.0.1:1"));
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let token = fetcher.request(date);

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(outcome) = fetcher.try_recv() {
                assert_eq!(outcome.token, token);
                assert_eq!(outcome.date, date);
                assert!(outcome.result.is_err());
                break;
            }
            assert!(Instant::now() < deadline, "no outcome within 10s");
            thread::sleep(Duration::from_millis(10));
        }
    }
}
