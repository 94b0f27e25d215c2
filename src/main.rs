//! Mailbox Settings - terminal settings screens for a mail account
//!
//! A Ratatui-based TUI for managing mail aliases and the account profile,
//! backed by a local JSON account store.

mod app;
mod config;
mod platform;
mod state;
mod store;
mod ui;

use anyhow::{Context, Result};
use app::App;
use config::SettingsConfig;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use store::{AccountBackend, JsonFileBackend, StoreClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = SettingsConfig::load()?;
    init_logging(&config)?;

    let store_path = config.resolved_store_path();
    let backend = Arc::new(JsonFileBackend::new(&store_path));
    let (snapshot, load_error) = match backend.load().await {
        Ok(snapshot) => (snapshot, None),
        Err(err) => {
            let path = backend.path().display();
            tracing::error!(%path, %err, "Failed to load account store");
            (
                Default::default(),
                Some(format!(
                    "Could not load {path}:\n{err}\nChanges will not be saved over it."
                )),
            )
        }
    };
    // A store that failed to load must not be overwritten
    let backend: Arc<dyn AccountBackend> = if load_error.is_some() {
        Arc::new(JsonFileBackend::new(store_path.with_extension("recovered.json")))
    } else {
        backend
    };

    let (client, worker) = StoreClient::connect(snapshot, backend, config.avatar_path.clone());
    let worker_handle = tokio::spawn(worker.run());
    let client = Arc::new(client);

    let mut app = App::new(
        client.clone(),
        client.clone(),
        config.default_namespace.as_deref(),
    )?;
    if let Some(message) = load_error {
        app.push_error(message);
    }
    drop(client);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let last_namespace = app.current_namespace();
    // Dropping the app closes the request channel; let the worker finish saving
    drop(app);
    if let Err(err) = worker_handle.await {
        tracing::error!(%err, "Account store worker panicked");
    }

    if config.remember_namespace(last_namespace) {
        if let Err(err) = config.save() {
            tracing::warn!(%err, "Could not save settings");
        }
    }

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file; the terminal belongs to the UI
fn init_logging(config: &SettingsConfig) -> Result<()> {
    let log_dir = SettingsConfig::data_dir();
    fs::create_dir_all(&log_dir).with_context(|| format!("creating {}", log_dir.display()))?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("mailbox-settings.log"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll so optimistic changes reconciled by the store worker show up
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key)?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
