mod app;
mod cli;
mod config;
mod event;
mod feed;
mod logging;
mod model;
mod notion;
mod screen;
mod sprint;
mod ui;
mod util;

use std::io;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::{Action, App};
use cli::Command;
use feed::TaskFeed;
use notion::{DatabaseClient, NotionClient};
use util::clipboard::SystemClipboard;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = cli::parse_args(&args)?;

    if command == Command::Help {
        cli::print_help();
        return Ok(());
    }

    if let Err(e) = logging::init() {
        eprintln!("warning: {e:#}");
    }

    if let Command::List { json } = command {
        return cli::handle_list(json).await;
    }

    // Validated config before touching the terminal
    let prefs = Arc::new(config::load_config()?);
    let client: Arc<dyn DatabaseClient> = Arc::new(NotionClient::new(&prefs));

    // Set up action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let feed = TaskFeed::new(client, prefs, action_tx.clone());
    let mut app = App::new(feed, Box::new(SystemClipboard));

    // Set up terminal; the panel draws on stderr so stdout stays clean
    enable_raw_mode()?;
    let mut ui_out = screen::ui_output();
    screen::enter_screen(&mut ui_out)?;
    let backend = CrosstermBackend::new(ui_out);
    let mut terminal = Terminal::new(backend)?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = screen::leave_screen(&mut screen::ui_output());
        original_hook(panic_info);
    }));

    // Spawn event reader
    let event_tx = action_tx.clone();
    tokio::spawn(async move {
        event::run_event_loop(event_tx).await;
    });

    // Initial fetch
    app.refresh();

    // Main loop
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(action) = action_rx.recv().await {
            app.update(action).await;
            if app.should_quit {
                break;
            }
        } else {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    screen::leave_screen(terminal.backend_mut())?;

    screen::write_paste(&mut io::stdout(), app.paste_on_exit.as_deref())?;

    Ok(())
}
