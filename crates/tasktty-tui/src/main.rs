use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tasktty_core::ItemFilter;
use tasktty_service::{credentials, BlockingHttpService, TaskStore};
use tracing::info;

use tasktty_tui::app::{App, Flow};
use tasktty_tui::config::Config;
use tasktty_tui::input::InputEvent;
use tasktty_tui::logging;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config.log_file)?;
    info!("tasktty starting, api {}", config.api_url);

    let token_path = config.token_path()?;
    let token = credentials::read_token(&token_path)?;
    let service = BlockingHttpService::connect(&config.api_url, token)
        .context("failed to set up the HTTP client")?;

    let mut store = TaskStore::new(service);
    store.sync().context("initial sync failed")?;
    info!(
        "loaded {} projects and {} open tasks",
        store.list_projects().len(),
        store.list_items(&ItemFilter::default()).len()
    );

    run_tui(store)
}

fn run_tui(store: TaskStore) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("tasktty exiting");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: TaskStore,
) -> Result<()> {
    let mut app = App::new(store);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        let event = InputEvent::from_event(&event::read()?);
        if app.handle_event(event) == Flow::Quit {
            break;
        }
    }

    Ok(())
}
