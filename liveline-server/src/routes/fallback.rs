//! Default response for every unmatched path or method
//!
//! The JSON endpoints match only a bare `GET <path>`: HEAD, any other
//! method, and any URL carrying a query string (even an empty `?`) get the
//! plaintext banner instead.

use axum::extract::Request;
use axum::handler::Handler;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, MethodRouter};

use crate::state::AppState;

pub const DEFAULT_BODY: &str = "Node App is Running";

pub async fn default_response() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], DEFAULT_BODY)
}

/// Route `handler` for GET only; axum would otherwise also serve HEAD with it.
pub fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler)
        .head(default_response)
        .fallback(default_response)
}

/// Route layer: a URL with a query string is not an exact match.
pub async fn exact_url(request: Request, next: Next) -> Response {
    if request.uri().query().is_some() {
        return default_response().await.into_response();
    }
    next.run(request).await
}
