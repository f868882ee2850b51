use anyhow::Result;
use chrono::{Duration, Months, NaiveDate};
use efem_core::{
    api::ApiClient,
    models::EventRecord,
    storage::{Connection, FavoritesStore, Preferences},
    Error,
};
use log::warn;
use std::path::Path;

use crate::config::{load_config, Config};
use crate::fetch::{FetchOutcome, Fetcher};

/// The two screens reachable from the bottom navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Favorites,
}

/// Display state of the home screen's event card
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded(EventRecord),
    NoData,
    Failed(String),
}

/// Application state
pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub config: Config,
    pub db_connection: Connection,
    pub favorites: FavoritesStore,
    pub selected_date: NaiveDate,
    pub fetch_state: FetchState,
    /// Token of the most recent fetch; outcomes carrying any other token
    /// are discarded when they arrive.
    pub current_fetch_token: Option<u64>,
    pub favorites_selected_index: usize,
    pub status_message: Option<String>,
    pub help_open: bool,
    fetcher: Fetcher,
}

impl App {
    /// Create a new App instance rooted at `data_dir`
    pub fn new(data_dir: &Path) -> Result<Self> {
        let prefs = Preferences::new(data_dir.join("efem.db"));
        let conn = prefs.get_or_create()?;

        let config = load_config(&data_dir.join("config.toml"));

        let mut favorites = FavoritesStore::new();
        favorites.load(&conn)?;

        let fetcher = Fetcher::new(ApiClient::new(config.api_base_url.clone()));
        let today = chrono::Local::now().date_naive();

        Ok(Self {
            should_quit: false,
            screen: Screen::Home,
            config,
            db_connection: conn,
            favorites,
            selected_date: today,
            fetch_state: FetchState::Idle,
            current_fetch_token: None,
            favorites_selected_index: 0,
            status_message: None,
            help_open: false,
            fetcher,
        })
    }

    // =========================
    // Fetching
    // =========================

    /// Start a background fetch for the selected date
    pub fn fetch_selected(&mut self) {
        let token = self.fetcher.request(self.selected_date);
        self.current_fetch_token = Some(token);
        self.fetch_state = FetchState::Loading;
        self.status_message = None;
    }

    /// Drain finished fetches; only the latest request may update the
    /// display state
    pub fn tick(&mut self) {
        while let Some(outcome) = self.fetcher.try_recv() {
            self.apply_fetch_outcome(outcome);
        }
    }

    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if self.current_fetch_token != Some(outcome.token) {
            return;
        }

        self.fetch_state = match outcome.result {
            Ok(record) => FetchState::Loaded(record),
            Err(Error::NoData) => FetchState::NoData,
            Err(Error::Server { status, body }) => {
                FetchState::Failed(format!("Error {}: {}", status, body))
            }
            Err(err) => {
                warn!("fetch for {} failed: {}", outcome.date, err);
                FetchState::Failed("Could not reach the server or read its response".to_string())
            }
        };
    }

    // =========================
    // Date navigation
    // =========================

    pub fn move_day(&mut self, delta: i64) {
        self.selected_date = self.selected_date + Duration::days(delta);
        self.fetch_selected();
    }

    pub fn move_month(&mut self, delta: i32) {
        self.selected_date = if delta >= 0 {
            self.selected_date + Months::new(delta as u32)
        } else {
            self.selected_date - Months::new(delta.unsigned_abs())
        };
        self.fetch_selected();
    }

    pub fn goto_today(&mut self) {
        self.selected_date = chrono::Local::now().date_naive();
        self.fetch_selected();
    }

    // =========================
    // Favorites
    // =========================

    /// The favorites in display order, most recent first
    pub fn favorites_view(&self) -> Vec<EventRecord> {
        self.favorites.sorted_by_date_desc()
    }

    /// Whether the event on the home screen is a favorite
    pub fn current_is_favorite(&self) -> bool {
        match &self.fetch_state {
            FetchState::Loaded(record) => self.favorites.contains(record),
            _ => false,
        }
    }

    /// Toggle favorite membership of the event on the home screen
    pub fn toggle_favorite_current(&mut self) {
        if let FetchState::Loaded(record) = &self.fetch_state {
            let record = record.clone();
            match self.favorites.toggle(&self.db_connection, &record) {
                Ok(true) => self.status_message = Some("Added to favorites".to_string()),
                Ok(false) => self.status_message = Some("Removed from favorites".to_string()),
                Err(err) => {
                    warn!("failed to persist favorites: {}", err);
                    self.status_message = Some("Could not save favorites".to_string());
                }
            }
            self.clamp_favorites_selection();
        }
    }

    /// Remove the favorite shown at the selected row of the sorted view
    pub fn remove_selected_favorite(&mut self) {
        let view = self.favorites_view();
        if let Some(record) = view.get(self.favorites_selected_index) {
            match self.favorites.remove(&self.db_connection, record) {
                Ok(()) => self.status_message = Some(format!("Removed \"{}\"", record.title)),
                Err(err) => {
                    warn!("failed to persist favorites: {}", err);
                    self.status_message = Some("Could not save favorites".to_string());
                }
            }
            self.clamp_favorites_selection();
        }
    }

    pub fn favorites_select_up(&mut self) {
        self.favorites_selected_index = self.favorites_selected_index.saturating_sub(1);
    }

    pub fn favorites_select_down(&mut self) {
        if self.favorites_selected_index + 1 < self.favorites.len() {
            self.favorites_selected_index += 1;
        }
    }

    fn clamp_favorites_selection(&mut self) {
        if self.favorites_selected_index >= self.favorites.len() {
            self.favorites_selected_index = self.favorites.len().saturating_sub(1);
        }
    }

    // =========================
    // Screens
    // =========================

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        self.status_message = None;
        self.clamp_favorites_selection();
    }

    pub fn next_screen(&mut self) {
        let next = match self.screen {
            Screen::Home => Screen::Favorites,
            Screen::Favorites => Screen::Home,
        };
        self.switch_screen(next);
    }

    pub fn open_help(&mut self) {
        self.help_open = true;
    }

    pub fn close_help(&mut self) {
        self.help_open = false;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(title: &str, day: u32, month: u32, year: i32) -> EventRecord {
        EventRecord::new(
            title.to_string(),
            format!("{} body", title),
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        )
    }

    #[test]
    fn test_app_creation() {
        let dir = tempdir().unwrap();
        let app = App::new(dir.path()).unwrap();
        assert!(!app.should_quit);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.fetch_state, FetchState::Idle);
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_toggle_favorite_for_loaded_event() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();
        let record = sample("Moon landing", 20, 7, 1969);
        app.fetch_state = FetchState::Loaded(record.clone());

        app.toggle_favorite_current();
        assert!(app.current_is_favorite());
        assert_eq!(app.favorites.len(), 1);

        app.toggle_favorite_current();
        assert!(!app.current_is_favorite());
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_stale_fetch_outcome_is_ignored() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        app.current_fetch_token = Some(2);
        app.fetch_state = FetchState::Loading;

        app.apply_fetch_outcome(FetchOutcome {
            token: 1,
            date,
            result: Ok(sample("Old", 1, 1, 2024)),
        });
        assert_eq!(app.fetch_state, FetchState::Loading);

        app.apply_fetch_outcome(FetchOutcome {
            token: 2,
            date,
            result: Ok(sample("New", 1, 1, 2024)),
        });
        match &app.fetch_state {
            FetchState::Loaded(record) => assert_eq!(record.title, "New"),
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_error_mapping() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        app.current_fetch_token = Some(1);
        app.apply_fetch_outcome(FetchOutcome {
            token: 1,
            date,
            result: Err(Error::NoData),
        });
        assert_eq!(app.fetch_state, FetchState::NoData);

        app.current_fetch_token = Some(2);
        app.apply_fetch_outcome(FetchOutcome {
            token: 2,
            date,
            result: Err(Error::Server {
                status: 500,
                body: "boom".to_string(),
            }),
        });
        match &app.fetch_state {
            FetchState::Failed(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("boom"));
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_remove_selected_favorite_uses_display_order() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();
        // Insert A (older) then B (newer); display order is B, A
        for record in [sample("A", 1, 1, 2024), sample("B", 5, 1, 2024)] {
            app.fetch_state = FetchState::Loaded(record);
            app.toggle_favorite_current();
        }

        app.favorites_selected_index = 0;
        app.remove_selected_favorite();

        let remaining: Vec<&str> = app
            .favorites
            .records()
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(remaining, vec!["A"]);
    }

    #[test]
    fn test_favorites_persist_across_instances() {
        let dir = tempdir().unwrap();
        {
            let mut app = App::new(dir.path()).unwrap();
            app.fetch_state = FetchState::Loaded(sample("A", 1, 1, 2024));
            app.toggle_favorite_current();
        }

        let app = App::new(dir.path()).unwrap();
        assert_eq!(app.favorites.len(), 1);
        assert_eq!(app.favorites.records()[0].title, "A");
    }

    #[test]
    fn test_screen_switching_clamps_selection() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();
        app.favorites_selected_index = 5;
        app.next_screen();
        assert_eq!(app.screen, Screen::Favorites);
        assert_eq!(app.favorites_selected_index, 0);

        app.next_screen();
        assert_eq!(app.screen, Screen::Home);
    }
}
