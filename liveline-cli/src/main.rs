//! liveline CLI - minimal HTTP responders
//!
//! Subcommands:
//! - `static`: answer every request with a plaintext banner
//! - `serve`: `/health` and `/users` backed by a MySQL connection pool
//!
//! Configuration comes from flags, the environment, or a `.env` file in the
//! working directory (existing environment variables win).

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "liveline",
    author,
    version,
    about = "Minimal HTTP responders: a static banner and a MySQL-backed health/users API"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer every request with "Node App is Running!"
    Static(commands::static_server::StaticArgs),
    /// Run the database-backed server (GET /health, GET /users)
    Serve(commands::serve::ServeArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Load `.env` before anything reads the environment.
fn load_dotenv() -> Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = load_dotenv();
    init_tracing()?;

    match dotenv {
        Ok(Some(path)) => debug!("Loaded .env from {}", path.display()),
        Ok(None) => debug!("No .env file found, using environment variables only"),
        Err(err) => warn!("Failed to load .env: {}", err),
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Static(args) => commands::run_static_server(args).await?,
        Commands::Serve(args) => commands::run_serve(args).await?,
    }

    Ok(())
}
