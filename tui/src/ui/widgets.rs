use crate::app::{App, FetchState, Screen};
use efem_core::models::format_display_date;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

/// Render the header with title and key hints
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.screen {
        Screen::Home => " 📅 Efemérides ".to_string(),
        Screen::Favorites => format!(" ⭐ Favorites ({}) ", app.favorites.len()),
    };

    let key_hints = if app.help_open {
        " [Esc:Close help] "
    } else {
        match app.screen {
            Screen::Home => {
                " [q:Quit] [h:Help] [←/→:Day] [PgUp/PgDn:Month] [t:Today] [r:Refresh] [f:Fav] [Tab:Screen] "
            }
            Screen::Favorites => " [q:Quit] [h:Help] [↑/↓:Select] [d:Remove] [Tab:Screen] ",
        }
    };

    let header_spans = vec![
        Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(key_hints, Style::default().fg(Color::DarkGray)),
    ];

    let header = Paragraph::new(Line::from(header_spans))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);

    frame.render_widget(header, area);
}

/// Render the home screen's event card
pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::raw("Date: "),
            Span::styled(
                format_display_date(app.selected_date),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    match &app.fetch_state {
        FetchState::Idle => lines.push(Line::from(Span::styled(
            "Press 'r' to fetch the event for this date.",
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::Loading => lines.push(Line::from(Span::styled(
            "Fetching…",
            Style::default().fg(Color::DarkGray),
        ))),
        FetchState::NoData => lines.push(Line::from(Span::styled(
            "No event recorded for this date.",
            Style::default().fg(Color::Yellow),
        ))),
        FetchState::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))),
        FetchState::Loaded(record) => {
            let marker = if app.favorites.contains(record) {
                " ★"
            } else {
                ""
            };
            lines.push(Line::from(Span::styled(
                format!("{}{}", record.title, marker),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(record.body.clone()));
        }
    }

    let card = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" On this day "))
        .wrap(Wrap { trim: true });

    frame.render_widget(card, area);
}

/// Render the favorites list, newest first
pub fn render_favorites(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.favorites_view();

    if view.is_empty() {
        let empty_message =
            Paragraph::new("No favorites yet. Press 'f' on the home screen to add one.")
                .block(Block::default().borders(Borders::ALL).title(" Favorites "))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty_message, area);
        return;
    }

    let items: Vec<ListItem> = view
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>10}  ", record.date_display),
                    Style::default().fg(Color::Green),
                ),
                Span::raw(record.title.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Favorites (newest first) "),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));

    let mut state = ListState::default();
    state.select(Some(app.favorites_selected_index.min(view.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the one-line status bar above the navigation
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(message) = &app.status_message {
        format!(" {}", message)
    } else {
        format!(" API: {}", app.config.api_base_url)
    };

    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Render the bottom navigation with the two screens.
/// Keep the label positions in sync with the hit test in
/// `event::handle_mouse_event`.
pub fn render_nav_bar(frame: &mut Frame, app: &App, area: Rect) {
    let index = match app.screen {
        Screen::Home => 0,
        Screen::Favorites => 1,
    };

    let tabs = Tabs::new(vec![" Home ", " Favorites "])
        .select(index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Render the help overlay
pub fn render_help_overlay(frame: &mut Frame, _app: &App, area: Rect) {
    let popup = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(Span::styled(
            "Key bindings",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  q          Quit"),
        Line::from("  Tab / 1 2  Switch screen"),
        Line::from("  ← / →      Previous / next day"),
        Line::from("  PgUp/PgDn  Previous / next month"),
        Line::from("  t          Jump to today"),
        Line::from("  r          Refresh the current date"),
        Line::from("  f / Space  Toggle favorite (home)"),
        Line::from("  ↑ / ↓      Move selection (favorites)"),
        Line::from("  d / Del    Remove favorite (favorites)"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .alignment(Alignment::Left);

    frame.render_widget(help, popup);
}

/// Centered popup rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
