//! Database-backed responder - Axum setup and lifecycle
//!
//! Server skeleton with:
//! - Request tracing
//! - Panics converted to the generic 500 JSON body
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServeConfig;
use crate::error::{panic_response, ServerResult};
use crate::routes::{self, default_response};
use crate::state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .fallback(default_response)
        .with_state(state);

    with_middleware(app)
}

fn with_middleware(app: Router) -> Router {
    app.layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Run the database-backed responder until a termination signal arrives.
///
/// # Example
///
/// ```ignore
/// run_server(ServeConfig::default()).await?;
/// ```
pub async fn run_server(config: ServeConfig) -> ServerResult<()> {
    tracing::debug!(database = ?config.database, "Starting database-backed responder");
    let state = AppState::from_config(&config.database);

    let listener = TcpListener::bind((config.listen.host.as_str(), config.listen.port)).await?;
    tracing::info!("Server is running at {}", config.listen.url());
    tracing::info!("Available endpoints:");
    tracing::info!("- GET /health - Check server status");
    tracing::info!("- GET /users - Get list of users");

    serve(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves, then close
/// the pool.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    state.close().await;
    tracing::info!("Server and database connections closed");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
pub async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
