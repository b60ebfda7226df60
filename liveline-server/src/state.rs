//! Server context handed to every handler
//!
//! Owns the connection pool of the database-backed responder: opened once in
//! `from_config`, closed once on shutdown. Clones share the same pool.

use sqlx::MySqlPool;

use crate::config::DatabaseConfig;
use crate::db::create_pool;

#[derive(Clone)]
pub struct AppState {
    pool: MySqlPool,
}

impl AppState {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Build the pool from configuration; no connection is opened yet.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self::new(create_pool(config))
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Close the pool; in-flight checkouts finish first.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}
