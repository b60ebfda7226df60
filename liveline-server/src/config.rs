//! Server configuration - listen address and database connection settings
//!
//! The CLI fills these from flags and environment variables:
//! - `HOST`, `PORT`: bind address (default: 127.0.0.1:3311)
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`: MySQL target
//! - `DB_CONNECTION_LIMIT`: pool size (default: 10)

use std::fmt;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

/// Default bind host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port
pub const DEFAULT_PORT: u16 = 3311;

/// Default MySQL port
pub const DEFAULT_DB_PORT: u16 = 3306;

/// Default maximum connections for the pool.
pub const DEFAULT_CONNECTION_LIMIT: u32 = 10;

/// How long a request waits for a pooled connection before failing.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Address a responder binds to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenConfig {
    pub host: String,
    pub port: u16,
}

impl ListenConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// URL printed in the startup banner
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

/// MySQL connection and pool settings
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Server host; `None` uses the driver default (localhost)
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Default schema; `None` connects without selecting one
    pub database: Option<String>,
    /// Upper bound on open connections
    pub connection_limit: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Build driver connect options from the configured fields.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new().port(self.port);

        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }

        options
    }

    pub fn with_connection_limit(mut self, limit: u32) -> Self {
        self.connection_limit = normalize_connection_limit(limit);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_DB_PORT,
            user: None,
            password: None,
            database: None,
            connection_limit: DEFAULT_CONNECTION_LIMIT,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .field("connection_limit", &self.connection_limit)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

/// Zero is treated as "unset" and falls back to the default limit.
pub fn normalize_connection_limit(limit: u32) -> u32 {
    if limit == 0 {
        DEFAULT_CONNECTION_LIMIT
    } else {
        limit
    }
}

/// Everything the database-backed responder needs to start
#[derive(Debug, Clone, Default)]
pub struct ServeConfig {
    pub listen: ListenConfig,
    pub database: DatabaseConfig,
}
