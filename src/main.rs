mod app;
mod config;
mod page;
mod theme;
mod ui;
mod vocabulary;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use theme::Theme;
use vocabulary::Deck;

#[derive(Parser, Debug)]
#[command(name = "tango")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "Japanese vocabulary flashcards in the terminal")]
struct Args {
    /// Load words from a TOML deck file instead of the built-in list
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Print the deck and exit
    #[arg(short, long)]
    list: bool,

    /// With --list, print JSON instead of a table
    #[arg(long, requires = "list")]
    json: bool,

    /// How long a card stays highlighted after pronouncing (milliseconds)
    #[arg(long)]
    announce_ms: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = AppConfig::load();
    config.apply_overrides(args.announce_ms, args.deck, args.log_file);

    init_logging(config.log_file.as_deref())?;

    let deck = load_deck(config.deck_path.as_deref()).await?;

    if args.list {
        return print_deck(&deck, args.json);
    }

    let theme = Theme::load(&config.theme);
    run_tui(App::new(deck, config.announce_window(), theme)).await
}

/// Logs only go to a file; the TUI owns stdout
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Logging to {}", path.display());
    Ok(())
}

async fn load_deck(path: Option<&Path>) -> Result<Deck> {
    match path {
        Some(path) => Ok(Deck::load(path).await?),
        None => Ok(Deck::default()),
    }
}

fn print_deck(deck: &Deck, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(deck.entries())?);
        return Ok(());
    }

    for (i, entry) in deck.entries().iter().enumerate() {
        println!(
            "{:>3}  {}\t{}\t{}\t[{}]",
            i + 1,
            entry.source_script,
            entry.transliteration,
            entry.translation,
            entry.category
        );
    }
    println!("\n{} words in {}", deck.len(), deck.categories().join(", "));
    Ok(())
}

async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Starting tango with {} entries", app.page.as_ref().map_or(0, |p| p.entries().len()));

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.set_viewport_width(terminal.size()?.width);
        terminal.draw(|f| ui::draw(f, app))?;

        // Short poll keeps the announce and float animations smooth
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            app.tick(Instant::now());
                            app.handle_key(key);
                        }
                    }
                }
            }
        }

        app.tick(Instant::now());
        tokio::task::yield_now().await;
    }
}
