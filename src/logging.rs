// Diagnostic logging setup.
// - The terminal belongs to the UI, so logs only go to a file when one is given.
// - Without `--log-file` no subscriber is installed and events are dropped.
use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing::Level;

use crate::error::Result;

pub fn init(log_file: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .init();
    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(())
}
