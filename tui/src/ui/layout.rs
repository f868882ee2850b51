use crate::app::{App, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use super::{
    render_favorites, render_header, render_help_overlay, render_home, render_nav_bar,
    render_status_bar,
};

/// Render the complete UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.size();

    // Create main layout: header, content, status bar, bottom navigation
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Bottom navigation
        ])
        .split(size);

    render_header(frame, app, chunks[0]);
    match app.screen {
        Screen::Home => render_home(frame, app, chunks[1]),
        Screen::Favorites => render_favorites(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
    render_nav_bar(frame, app, chunks[3]);

    // Overlays (drawn last)
    if app.help_open {
        render_help_overlay(frame, app, size);
    }
}
