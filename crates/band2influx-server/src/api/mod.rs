//! HTTP surface of the collector: router, health check and the server loop

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use band2influx_common::sink::Sink;
use serde_json::json;
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{error, info, warn};

use crate::{auth::Credentials, config::Config, features, middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn Sink>,
    pub database: Arc<str>,
    pub credentials: Arc<Credentials>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(sink: Arc<dyn Sink>, config: &Config) -> Self {
        Self {
            sink,
            database: Arc::from(config.sink.database.as_str()),
            credentials: Arc::new(config.credentials.clone()),
            max_body_bytes: config.server.max_body_bytes,
        }
    }
}

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn serve(config: &Config, state: AppState) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    serve_with_shutdown(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await
}

/// Serve `app` until `signal` resolves, then drain for at most `grace`.
///
/// Once the signal fires the listener stops accepting. Requests already in
/// flight get `grace` to finish; whatever is left after that is dropped.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let drain = Arc::new(Notify::new());
    let mut server = tokio::spawn({
        let drain = drain.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { drain.notified().await })
                .await
        }
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            return Ok(());
        }
        _ = signal => {}
    }

    drain.notify_one();
    info!("Waiting up to {} seconds for in-flight requests", grace.as_secs());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => {
            joined??;
            info!("Server shut down gracefully");
        },
        Err(_) => {
            server.abort();
            warn!("Shutdown window elapsed, dropping remaining connections");
        },
    }

    Ok(())
}

/// Creates the application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state.clone())
        .nest("/api", features::router(state))
        .layer(middleware::tracing_layer())
}

/// Health check handler
async fn health_check(State(state): State<AppState>) -> Response {
    if state.sink.ping().await {
        (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "sink": state.sink.sink_type(),
            })),
        )
            .into_response()
    } else {
        error!("Sink health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "sink": state.sink.sink_type(),
            })),
        )
            .into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
