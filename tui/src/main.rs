use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use todo_tui::config::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log to `path` if given. Without a log file nothing is installed: stdout
/// and stderr belong to the UI.
fn init_tracing(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("TODO_LOG")
        .unwrap_or_else(|_| EnvFilter::new("todo_core=debug,todo_tui=debug,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;
    todo_tui::run(&config)
}
