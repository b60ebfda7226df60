//! liveline-server: minimal HTTP responders
//!
//! Two independent servers:
//! - a static responder that answers everything with a plaintext banner
//! - a database-backed responder with `/health` and `/users` over a MySQL pool

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod static_responder;

pub use config::{DatabaseConfig, ListenConfig, ServeConfig};
pub use error::{ApiError, ServerError, ServerResult};
pub use server::{build_router, run_server, serve, shutdown_signal};
pub use state::AppState;
pub use static_responder::{run_static, static_router};
