//! tictac - unified CLI
//!
//! Serves the game over HTTP or plays it in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::PathBuf;
use tictac::{AppState, Difficulty, ServerConfig, SessionManager, router};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Http {
            host,
            port,
            config,
            difficulty,
        } => run_http_server(config, host, port, difficulty).await,
        Command::Play {
            difficulty,
            computer_first,
        } => tictac::run_tui(difficulty, computer_first),
    }
}

/// Run the HTTP game server
#[instrument(skip_all)]
async fn run_http_server(
    config_path: PathBuf,
    host: Option<String>,
    port: Option<u16>,
    difficulty: Option<Difficulty>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tictac=debug,tictac_core=debug")),
        )
        .init();

    let config = ServerConfig::load(&config_path)?.with_overrides(host, port, difficulty);
    info!(
        host = %config.host(),
        port = config.port(),
        difficulty = %config.difficulty(),
        "Starting tictac HTTP server"
    );

    let sessions = SessionManager::with_limits(
        *config.difficulty(),
        *config.max_sessions(),
        config.session_idle_timeout(),
    );
    let app = router(AppState::new(sessions));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
