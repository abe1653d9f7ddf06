//! Server startup and shutdown.

use tokio::net::TcpListener;

use crate::config::ApiConfig;
use crate::routes::router;
use crate::state::AppState;

/// Serve until Ctrl-C
pub async fn serve(config: ApiConfig, state: AppState) -> std::io::Result<()> {
    let app = router(state, &config);
    let listener = TcpListener::bind(config.http.bind_addr).await?;

    tracing::info!("FormCheck API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
