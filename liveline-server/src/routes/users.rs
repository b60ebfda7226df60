//! Users endpoint
//!
//! GET /users - pass-through `SELECT * FROM users LIMIT 100`

use axum::{extract::State, middleware, Json, Router};

use super::fallback::{exact_url, get_only};
use crate::db::{fetch_users, UserRow};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRow>>, ApiError> {
    let users = fetch_users(state.pool()).await?;
    Ok(Json(users))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get_only(list_users))
        .route_layer(middleware::from_fn(exact_url))
}
