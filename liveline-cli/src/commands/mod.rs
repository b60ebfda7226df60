//! Command implementations for liveline CLI

use clap::Args;
use liveline_server::config::{DEFAULT_HOST, DEFAULT_PORT};
use liveline_server::ListenConfig;

pub mod serve;
pub mod static_server;

// Re-export main dispatcher functions for flat access from main.rs
pub use serve::run_serve;
pub use static_server::run_static_server;

/// Bind address shared by both responders
#[derive(Args, Debug, Clone)]
pub struct ListenArgs {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

impl From<ListenArgs> for ListenConfig {
    fn from(args: ListenArgs) -> Self {
        ListenConfig::new(args.host, args.port)
    }
}
