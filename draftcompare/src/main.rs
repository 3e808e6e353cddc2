mod app;
mod effects;
mod input;
mod screens;

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use draftcompare_core::{Caliber, CardCatalog, Metric, ViewState};

use app::App;
use input::InputBatch;

#[derive(Parser, Debug)]
#[command(name = "draftcompare")]
#[command(about = "Compare draft statistics for a handful of cards", long_about = None)]
struct Cli {
    /// Card statistics dataset
    #[arg(long, default_value = "master.json")]
    data: PathBuf,

    /// Where log lines go; the terminal belongs to the UI
    #[arg(long, default_value = "draftcompare.log")]
    log_file: PathBuf,

    /// Frame interval in milliseconds
    #[arg(long, default_value_t = 33)]
    tick_ms: u32,

    /// Starting player pool: all or top
    #[arg(long, default_value = "all")]
    caliber: Caliber,

    /// Starting metric: oh, gih or gd
    #[arg(long, default_value = "gih")]
    metric: Metric,
}

fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    // Load before touching the terminal so errors print normally
    let catalog = CardCatalog::load(&cli.data)
        .wrap_err_with(|| format!("failed to load card data from {}", cli.data.display()))?;

    let view = ViewState {
        caliber: cli.caliber,
        metric: cli.metric,
        ..ViewState::default()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let mut app = App::new(&catalog, view, cli.tick_ms);
    let result = run_app(&mut terminal, &mut app, cli.tick_ms);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Session ended with an error");
    }
    info!(frames = app.tick, "Session closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_ms: u32,
) -> color_eyre::Result<()> {
    let tick = Duration::from_millis(u64::from(tick_ms));

    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        // Everything that arrived since the last frame is handled as one batch
        let mut batch = InputBatch::default();
        if event::poll(tick)? {
            batch.push(event::read()?);
            while event::poll(Duration::ZERO)? {
                batch.push(event::read()?);
            }
        }

        if app.handle_batch(batch) {
            break; // Quit signal
        }

        app.tick();
    }

    Ok(())
}
