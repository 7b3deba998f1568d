//! Terminal front end for the todo manager.
//!
//! # Overview
//! `app` holds screen state and turns key presses into requests, `worker`
//! runs those requests on background threads, `ui` draws a frame, and
//! `run` ties them together around a crossterm event loop.

pub mod app;
pub mod config;
pub mod ui;
pub mod worker;

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use todo_core::{TodoClient, TodoManager};
use tracing::info;

use app::App;
use config::Config;
use worker::{Completion, Executor};

const FRAME: Duration = Duration::from_millis(100);

/// Entry point for the TUI.
pub fn run(config: &Config) -> Result<()> {
    let manager = TodoManager::new(TodoClient::new(&config.base_url))
        .with_theme(config.theme())
        .with_filter(config.filter)
        .with_notification_ttl(config.notify_ttl());
    let mut app = App::new(manager);

    let (tx, rx) = mpsc::channel();
    let executor = Executor::new(config.timeout(), tx);
    info!(base_url = %config.base_url, "starting todo manager");
    executor.dispatch(app.start());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        disable_raw_mode().ok();
        return Err(e.into());
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app, &executor, &rx);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    executor: &Executor,
    rx: &Receiver<Completion>,
) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|frame| ui::render(frame, app, chrono::Utc::now()))?;

        if event::poll(FRAME)? {
            if let Event::Key(key) = event::read()? {
                for pending in app.handle_key(key, Instant::now()) {
                    executor.dispatch(pending);
                }
            }
        }

        while let Ok(Completion { op, outcome }) = rx.try_recv() {
            if let Some(next) = app.on_completion(op, outcome, Instant::now()) {
                executor.dispatch(next);
            }
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}
