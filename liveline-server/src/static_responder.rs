//! Static responder - every request gets the same plaintext banner
//!
//! No state, no database, no shutdown hook.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::ListenConfig;
use crate::error::ServerResult;

pub const STATIC_BODY: &str = "Node App is Running!";

async fn banner() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], STATIC_BODY)
}

/// Router answering every path and method with the banner
pub fn static_router() -> Router {
    Router::new().fallback(banner)
}

/// Bind and serve the static responder until the process is stopped.
pub async fn run_static(listen: ListenConfig) -> ServerResult<()> {
    let listener = TcpListener::bind((listen.host.as_str(), listen.port)).await?;
    tracing::info!("Server is running at {}", listen.url());

    axum::serve(listener, static_router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn every_path_and_method_gets_banner() {
        let app = static_router();

        for (method, uri) in [
            ("GET", "/"),
            ("GET", "/health"),
            ("POST", "/users"),
            ("DELETE", "/a/b/c?x=1"),
            ("PATCH", "/"),
        ] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "{method} {uri}");
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "text/plain",
                "{method} {uri}"
            );
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], STATIC_BODY.as_bytes());
        }
    }
}
