mod app;
mod config;
mod gallery;
mod images;
mod meme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;
use gallery::Gallery;
use images::ImageManager;

#[derive(Parser, Debug)]
#[command(name = "memewall")]
#[command(about = "TUI meme gallery - image cards in a grid, add your own")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/memewall/config.toml")]
    config: String,

    /// Theme preset, overrides the config file
    #[arg(long)]
    theme: Option<String>,

    /// Disable graphics-protocol images (text placeholders only)
    #[arg(long)]
    no_images: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memewall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let mut config = Config::load(&cli.config)?;
    if let Some(theme) = cli.theme {
        config.appearance.theme = theme;
    }

    // Graphics detection queries the terminal, so it must happen before
    // raw mode / alternate screen
    let images = if config.images.enabled && !cli.no_images {
        Some(Arc::new(Mutex::new(ImageManager::new(
            &config.images.placeholder,
        ))))
    } else {
        None
    };

    let gallery = Gallery::seeded();
    tracing::info!("Seeded {} memes", gallery.len());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and start loading card images
    let mut app = App::new(gallery, config, images);
    app.request_images();

    // Run main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_images();
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let ctrl = key.modifiers.contains(event::KeyModifiers::CONTROL);

                if app.overlay_open() {
                    match key.code {
                        KeyCode::Esc => app.close_overlay(),
                        KeyCode::Char('c') if ctrl => return Ok(()),
                        KeyCode::Tab | KeyCode::Down => app.focus_next(),
                        KeyCode::BackTab | KeyCode::Up => app.focus_prev(),
                        KeyCode::Enter => app.submit_draft(),
                        KeyCode::Backspace => app.pop_draft_char(),
                        KeyCode::Char(c) if !ctrl => app.push_draft_char(c),
                        _ => {}
                    }
                } else {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('c') if ctrl => return Ok(()),
                        KeyCode::Char('a') => app.open_overlay(),
                        KeyCode::Up | KeyCode::Char('k') => app.select_up(),
                        KeyCode::Down | KeyCode::Char('j') => app.select_down(),
                        KeyCode::Left | KeyCode::Char('h') => app.select_left(),
                        KeyCode::Right | KeyCode::Char('l') => app.select_right(),
                        KeyCode::Home => app.select_home(),
                        KeyCode::End => app.select_end(),
                        _ => {}
                    }
                }
            }
        }
    }
}
