//! Database connection pool management
//!
//! Uses sqlx MySqlPool bounded by the configured connection limit.
//! Connections are opened on first use, so an unreachable database does not
//! stop the server from starting; each request reports the failure instead.

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::{normalize_connection_limit, DatabaseConfig};

/// Create a MySQL connection pool.
///
/// Requests beyond `connection_limit` wait for a free connection until the
/// acquire timeout elapses.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default());
/// ```
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    let max_connections = normalize_connection_limit(config.connection_limit);

    tracing::debug!(
        max_connections,
        host = config.host.as_deref().unwrap_or("localhost"),
        port = config.port,
        database = config.database.as_deref().unwrap_or(""),
        "Creating database pool"
    );

    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}
