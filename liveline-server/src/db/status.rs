//! Database liveness check

use serde::Serialize;
use sqlx::MySqlPool;

/// Liveness query; the server answers with a single `db_ok = 1` row
pub const STATUS_QUERY: &str = "SELECT 1 AS db_ok";

/// Database reachability as reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbStatus {
    Connected,
    Disconnected,
}

/// Run the liveness check against the pool.
///
/// Never fails: any error (unreachable host, bad credentials, pool
/// timeout) is logged and reported as `Disconnected`.
pub async fn check_db_status(pool: &MySqlPool) -> DbStatus {
    match sqlx::query_scalar::<_, i64>(STATUS_QUERY)
        .fetch_one(pool)
        .await
    {
        Ok(1) => DbStatus::Connected,
        Ok(other) => {
            tracing::warn!(db_ok = other, "Database status check returned unexpected value");
            DbStatus::Disconnected
        }
        Err(e) => {
            tracing::warn!("Database status check failed: {}", e);
            DbStatus::Disconnected
        }
    }
}
