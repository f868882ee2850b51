use anyhow::Result;
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Duration;

use crate::app::{App, Screen};

/// Terminal events
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal tick event
    Tick,
    /// Mouse event
    Mouse(MouseEvent),
}

/// Event handler for the terminal
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CEvent::Key(key) => return Ok(Event::Key(key)),
                CEvent::Mouse(m) => return Ok(Event::Mouse(m)),
                _ => {}
            }
        }
        Ok(Event::Tick)
    }
}

/// Handle key events for the application
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    // On Windows, crossterm reports both key press and release events.
    // We only want to handle press events to avoid duplicates.
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Help overlay takes precedence
    if app.help_open {
        match key.code {
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') => app.close_help(),
            _ => {}
        }
        return;
    }

    // Global bindings
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.quit();
            return;
        }
        KeyCode::Char('h') | KeyCode::Char('?') => {
            app.open_help();
            return;
        }
        KeyCode::Tab => {
            app.next_screen();
            return;
        }
        KeyCode::Char('1') => {
            app.switch_screen(Screen::Home);
            return;
        }
        KeyCode::Char('2') => {
            app.switch_screen(Screen::Favorites);
            return;
        }
        _ => {}
    }

    match app.screen {
        Screen::Home => handle_home_input(key, app),
        Screen::Favorites => handle_favorites_input(key, app),
    }
}

/// Key events on the home screen
fn handle_home_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Left => app.move_day(-1),
        KeyCode::Right => app.move_day(1),
        KeyCode::PageUp => app.move_month(-1),
        KeyCode::PageDown => app.move_month(1),
        KeyCode::Char('t') => app.goto_today(),
        KeyCode::Char('r') => app.fetch_selected(),
        KeyCode::Char('f') | KeyCode::Char(' ') => app.toggle_favorite_current(),
        _ => {}
    }
}

/// Key events on the favorites screen
fn handle_favorites_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.favorites_select_up(),
        KeyCode::Down => app.favorites_select_down(),
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_favorite(),
        _ => {}
    }
}

/// Handle mouse events: clicks on the bottom navigation and wheel
/// scrolling on the favorites list
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App, size: Rect) {
    match mouse.kind {
        MouseEventKind::Down(_) => {
            // Very simple hit-testing matched to the nav bar layout:
            // " Home " starts at column 0, " Favorites " after the divider
            if mouse.row == size.height.saturating_sub(1) {
                if mouse.column <= 6 {
                    app.switch_screen(Screen::Home);
                } else if mouse.column <= 19 {
                    app.switch_screen(Screen::Favorites);
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if app.screen == Screen::Favorites {
                app.favorites_select_up();
            }
        }
        MouseEventKind::ScrollDown => {
            if app.screen == Screen::Favorites {
                app.favorites_select_down();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use tempfile::tempdir;

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(250);
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_tab_switches_screens() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();

        handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), &mut app);
        assert_eq!(app.screen, Screen::Favorites);

        handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), &mut app);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_q_quits() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();

        handle_key_event(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            &mut app,
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_overlay_swallows_other_keys() {
        let dir = tempdir().unwrap();
        let mut app = App::new(dir.path()).unwrap();

        handle_key_event(
            KeyEvent::new(KeyCode::Char('h'), KeyModifiers::NONE),
            &mut app,
        );
        assert!(app.help_open);

        // Tab is ignored while help is open
        handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE), &mut app);
        assert_eq!(app.screen, Screen::Home);

        handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), &mut app);
        assert!(!app.help_open);
    }
}
