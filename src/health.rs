use std::net::SocketAddr;

use anyhow::Context;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

pub const STATUS_TEXT: &str = "Movie Bot is running...";

pub fn router() -> Router {
    Router::new().route("/", get(status))
}

async fn status() -> &'static str {
    STATUS_TEXT
}

/// Эндпоинт для хостинга/uptime-проверок, без авторизации.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind health endpoint to {addr}"))?;
    info!(%addr, "health endpoint listening");
    serve_on(listener).await
}

pub async fn serve_on(listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router()).await.context("health endpoint failed")
}
