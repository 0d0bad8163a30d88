use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info};

use crate::app::AppState;
use crate::presentation::routes::build_router;

/// Bind the configured address and serve until `shutdown` resolves
pub async fn run_server(
    app_state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let address = format!(
        "{}:{}",
        app_state.config.server.host, app_state.config.server.port
    );
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        error!("Failed to bind {}: {}", address, e);
        format!("Failed to bind {}: {}", address, e)
    })?;

    serve(listener, app_state, shutdown).await
}

/// Serve on an already bound listener
pub async fn serve(
    listener: TcpListener,
    app_state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), String> {
    let local: SocketAddr = listener
        .local_addr()
        .map_err(|e| format!("Failed to read listener address: {}", e))?;
    info!("Portfolio server listening on http://{}", local);

    axum::serve(listener, build_router(app_state))
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Portfolio server is shutting down...");
        })
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
