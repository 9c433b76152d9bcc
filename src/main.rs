// Terminal entry point.
// - Parses the command line, sets up file logging, and opens the styling dialog.
// - Runs the draw/poll loop until the user quits.
mod app;
mod color;
mod error;
mod logging;
mod model;
mod palette;
mod pawn;
mod race;
mod ui;

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{Level, info};

use crate::app::App;

#[derive(Parser)]
#[command(name = "styling-station")]
#[command(about = "Restyle a character's body addons: colors and variants", long_about = None)]
struct Cli {
    /// Race definition JSON describing color channels and body addons
    race: PathBuf,

    /// Pawn JSON to edit; a fresh pawn is generated when missing
    #[arg(long)]
    pawn: Option<PathBuf>,

    /// Append diagnostic logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Maximum log level written to the log file
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.log_level).context("failed to open log file")?;

    let mut app = App::new(cli.race.clone(), cli.pawn)
        .with_context(|| format!("failed to open {}", cli.race.display()))?;

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, &mut app);
    ratatui::restore();
    info!("styling dialog closed");
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> anyhow::Result<()> {
    loop {
        app.prepare_frame();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            break Ok(());
        }
    }
}
