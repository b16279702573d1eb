mod api;
mod app;
mod cli;
mod config;
mod metrics;
mod runtime;
mod session_store;
mod tier;
mod types;
mod ui;

use anyhow::{Context, Result};
use api::{Backend, DevBackend, FirebaseBackend, IdentityService};
use app::App;
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::from_filename(".env.tui").ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = config::TamalogConfig::ensure_file()?;
            println!("{}", path.display());
        }
        Commands::Logout => {
            session_store::clear_session()?;
            println!("Logged out. Session cleared.");
        }
        Commands::Login => {
            init_logging()?;
            let cfg = config::TamalogConfig::load()?;
            cfg.require_firebase()?;
            run_login(&cfg).await?;
        }
        Commands::Dev => {
            init_logging()?;
            let cfg = config::TamalogConfig::load()?;
            let backend = DevBackend::seeded(&cfg.demo_credentials());
            println!("Dev mode: in-memory backend, demo account {}", cfg.demo_email);
            let mut app = App::new(&cfg);
            run_ui(&mut app, &backend).await?;
        }
        Commands::Run => {
            init_logging()?;
            let cfg = config::TamalogConfig::load()?;
            cfg.require_firebase()?;
            let backend = FirebaseBackend::new(&cfg);
            let mut app = App::new(&cfg);

            if let Some(session) = session_store::load_session()? {
                match backend.restore(session).await {
                    Ok(user) => {
                        tracing::info!(user = %user.id, "session restored");
                        app.viewport_width = runtime::viewport_width(app.cell_width_px);
                        runtime::enter_app(&mut app, &backend, false).await;
                    }
                    Err(e) if e.invalidates_session() => {
                        tracing::warn!(error = %e, "saved session is no longer valid");
                        if let Err(e) = session_store::clear_session() {
                            tracing::warn!("could not remove session file: {:#}", e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "could not restore session, keeping it for next run");
                        app.set_status(format!("Could not reach the server: {}", e));
                    }
                }
            }

            run_ui(&mut app, &backend).await?;
        }
    }

    Ok(())
}

/// Log to a file next to the config so the alternate screen stays clean.
fn init_logging() -> Result<()> {
    let path = session_store::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run_login(cfg: &config::TamalogConfig) -> Result<()> {
    print!("Email: ");
    io::stdout().flush()?;
    let mut email = String::new();
    io::stdin()
        .read_line(&mut email)
        .context("Failed to read email")?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;

    let backend = FirebaseBackend::new(cfg);
    let credentials = types::Credentials::new(email.trim(), password);
    let user = backend
        .sign_in(&credentials)
        .await
        .map_err(|e| anyhow::anyhow!("Login failed: {}", e))?;

    println!("Logged in as {}. Session saved.", user.email);
    Ok(())
}

async fn run_ui(app: &mut App, backend: &dyn Backend) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    // Buttons come alive once the screen is ours
    app.is_ready = true;
    app.viewport_width = runtime::viewport_width(app.cell_width_px);

    let res = runtime::run_app(&mut terminal, app, backend).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{:?}", err);
        eprintln!("Error: {:?}", err);
    }

    println!("\nまたね!");

    Ok(())
}
