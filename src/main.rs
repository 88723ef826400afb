mod command;
mod config;
mod error;
mod format;
mod genre;
mod handlers;
mod health;
mod session;
mod tg;
mod tmdb;

use dotenvy::dotenv;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // без токена и ключа TMDB дальше не идём
    let config = config::Config::from_env()?;

    let tmdb = tmdb::TmdbClient::new(config.tmdb_api_key, config.tmdb_base_url, config.http_timeout)?;
    let sessions = session::SessionStore::new(config.session_idle);
    let handlers = handlers::Handlers::new(tmdb, sessions);

    let port = config.port;
    tokio::spawn(async move {
        if let Err(e) = health::serve(port).await {
            error!(error = %e, "health endpoint stopped");
        }
    });

    info!("🤖 Bot is running...");
    tg::run(Bot::new(config.bot_token), handlers).await;
    Ok(())
}
