//! HTTP server for the mounted route plugins

use axum::Router;
use std::net::SocketAddr;

use crate::application::errors::BotError;

/// Bind `addr` and serve `router` until the task is dropped
pub async fn serve(router: Router, addr: SocketAddr) -> Result<(), BotError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BotError::Network(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("HTTP API listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| BotError::Network(format!("HTTP server stopped: {}", e)))
}
