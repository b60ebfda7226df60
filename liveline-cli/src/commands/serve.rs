//! HTTP server command for the database-backed responder
//!
//! Runs `/health` and `/users` over a MySQL pool until SIGINT/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;

use liveline_server::config::{DEFAULT_CONNECTION_LIMIT, DEFAULT_DB_PORT};
use liveline_server::{run_server, DatabaseConfig, ServeConfig};

use super::ListenArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub listen: ListenArgs,

    /// MySQL host (driver default: localhost)
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// MySQL port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_DB_PORT)]
    pub db_port: u16,

    /// MySQL user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// MySQL password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Default schema
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Maximum pooled connections (0 means the default)
    #[arg(long, env = "DB_CONNECTION_LIMIT", default_value_t = DEFAULT_CONNECTION_LIMIT)]
    pub db_connection_limit: u32,
}

impl ServeArgs {
    pub fn into_config(self) -> ServeConfig {
        let database = DatabaseConfig {
            host: self.db_host,
            port: self.db_port,
            user: self.db_user,
            password: self.db_password,
            database: self.db_name,
            ..Default::default()
        }
        .with_connection_limit(self.db_connection_limit);

        ServeConfig {
            listen: self.listen.into(),
            database,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}
