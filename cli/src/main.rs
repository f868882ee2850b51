use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use efem_tui::{App, EventHandler};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let data_dir = resolve_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    init_logging(&data_dir)?;
    info!("starting efem, data dir {}", data_dir.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and fetch today's event before the first frame
    let mut app = App::new(&data_dir)?;
    app.fetch_selected();

    let event_handler = EventHandler::new(app.config.tick_rate_ms);

    // Main loop
    let result = run_app(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print result
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

/// Data directory: `EFEM_DATA_DIR`, else the platform data dir, else cwd
fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("EFEM_DATA_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_local_dir()
        .map(|d| d.join("efem"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Log to a file; the terminal is in raw mode while the app runs
fn init_logging(data_dir: &Path) -> Result<()> {
    let log_file = File::create(data_dir.join("efem.log"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| efem_tui::ui::render(f, app))?;

        // Handle events
        let event = event_handler.next()?;
        match event {
            efem_tui::Event::Key(key) => {
                efem_tui::event::handle_key_event(key, app);
            }
            efem_tui::Event::Mouse(mouse) => {
                let size = terminal.size()?;
                efem_tui::event::handle_mouse_event(mouse, app, size);
            }
            efem_tui::Event::Tick => {
                app.tick();
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
