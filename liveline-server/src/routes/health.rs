//! Health check endpoint
//!
//! GET /health - server liveness plus a database check. Always 200; a failed
//! check only changes `dbStatus`.

use axum::{extract::State, middleware, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::fallback::{exact_url, get_only};
use crate::db::{check_db_status, DbStatus};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    #[serde(rename = "dbStatus")]
    pub db_status: DbStatus,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let db_status = check_db_status(state.pool()).await;

    Json(HealthResponse {
        status: "OK",
        timestamp,
        db_status,
    })
}

/// Health routes; anything but a bare `GET /health` gets the default response
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get_only(health))
        .route_layer(middleware::from_fn(exact_url))
}
