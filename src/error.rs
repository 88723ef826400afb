use reqwest::StatusCode;
use thiserror::Error;

use crate::genre::Genre;

/// Сбой при обращении к TMDB.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint}: unexpected status {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("{endpoint}: malformed payload: {source}")]
    Payload {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Исход обработки запроса, который превращается в ответ пользователю.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("unknown genre {0:?}")]
    UnknownGenre(String),
    #[error("movie not found")]
    NotFound,
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl BotError {
    /// `action` описывает, что не удалось: "trailer", "recommendations".
    pub fn user_message(&self, action: &str) -> String {
        match self {
            BotError::UnknownGenre(_) => {
                format!("❌ Unknown genre. Try: {}", Genre::known_names())
            }
            BotError::NotFound => "❌ Movie not found.".to_string(),
            BotError::Provider(_) => {
                format!("⚠️ Error fetching {action}. Please try again later.")
            }
        }
    }
}

/// Ошибки старта: без токена бота и ключа TMDB не запускаемся.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is missing")]
    Missing(&'static str),
    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}
