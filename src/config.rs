use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub http_timeout: Duration,
    pub session_idle: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| get(name).filter(|v| !v.trim().is_empty());

        let bot_token = var("TELOXIDE_TOKEN")
            .or_else(|| var("TELEGRAM_TOKEN"))
            .ok_or(ConfigError::Missing("TELOXIDE_TOKEN"))?;
        let tmdb_api_key = var("TMDB_API_KEY").ok_or(ConfigError::Missing("TMDB_API_KEY"))?;
        let tmdb_base_url = var("TMDB_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string());

        let http_timeout = Duration::from_secs(positive_or("TMDB_TIMEOUT_SECS", var("TMDB_TIMEOUT_SECS"), 10)?);
        let session_idle = Duration::from_secs(positive_or("SESSION_IDLE_SECS", var("SESSION_IDLE_SECS"), 86_400)?);
        let port = parse_or("PORT", var("PORT"), 3000)?;

        Ok(Self { bot_token, tmdb_api_key, tmdb_base_url, http_timeout, session_idle, port })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { name, value: v }),
    }
}

/// Нулевой TTL/таймаут бессмыслен: сессия пропадёт сразу, запросы отвалятся.
fn positive_or(name: &'static str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    match parse_or(name, value.clone(), default)? {
        0 => Err(ConfigError::Invalid { name, value: value.unwrap_or_default() }),
        n => Ok(n),
    }
}
