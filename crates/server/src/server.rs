//! Server initialization and routing
//!
//! Request pipeline, outermost first:
//! - Trace, request id, request logging, timeout, CORS, body limit
//! - Path normalization (base path, case, trailing slashes)
//! - API key gate
//! - Route table
//!
//! Normalization and the gate sit in front of the router so that unknown
//! paths are also rejected without a key, and `/API/Award/` resolves to the
//! same route as `/api/award`.

use crate::config::ServerConfig;
use crate::middleware::{api_key_auth, log_requests, normalize_request, request_id};
use crate::routes::route_table;
use crate::state::ServerState;
use crate::error::ServerError;
use axum::error_handling::HandleErrorLayer;
use axum::extract::{DefaultBodyLimit, Request};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::timeout::error::Elapsed;
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete application around the given state.
pub fn build_app(state: Arc<ServerState>) -> Router {
    let config = state.config.clone();

    let gated = route_table()
        .layer(from_fn_with_state(state.clone(), api_key_auth))
        .with_state(state);

    let base_path = config.base_path.clone();
    let normalized = ServiceBuilder::new()
        .map_request(move |request: Request| normalize_request(&base_path, request))
        .service(gated);

    let cors = if config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .fallback_service(normalized)
        .layer(DefaultBodyLimit::max(config.max_body_size()))
        .layer(cors)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(config.timeout())),
        )
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
}

/// Turn a timed-out request into a 408 with the usual error envelope.
async fn handle_timeout_error(err: BoxError) -> ServerError {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        ServerError::RequestTimeout
    } else {
        ServerError::Internal(err.to_string())
    }
}

/// Start the catalog HTTP server
///
/// Sets up JSON logging, opens the database (creating the schema when
/// `create_schema` is set), then serves until SIGTERM or Ctrl+C.
///
/// # Example
///
/// ```rust,no_run
/// use server::ServerConfig;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ServerConfig::load()?;
///     server::start_server(config).await?;
///     Ok(())
/// }
/// ```
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!("Starting CHI catalog server on {}", addr);
    tracing::info!(
        "Timeout: {}s, Max body: {}MB",
        config.timeout_secs,
        config.max_body_size_mb
    );
    tracing::info!(
        "CORS: {}, Base path: '{}'",
        config.enable_cors,
        config.base_path
    );

    let state = Arc::new(ServerState::new(config)?);
    tracing::info!("Database: {}", state.database.path().display());
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
