use tracing::{debug, error, info};

use crate::command::Command;
use crate::error::BotError;
use crate::format::{self, Outbound};
use crate::genre::Genre;
use crate::session::{Direction, SessionStore};
use crate::tmdb::{pick_trailer, TmdbClient};

pub const NO_ACTIVE_SESSION: &str = "Nothing to page through. Try /recommend <genre>.";

/// Логика бота без транспорта: на входе событие, на выходе сообщения.
#[derive(Clone)]
pub struct Handlers {
    tmdb: TmdbClient,
    sessions: SessionStore,
}

/// Ответ на нажатие кнопки: сообщения в чат и текст всплывашки callback-а.
#[derive(Debug, Default, PartialEq)]
pub struct NavReply {
    pub messages: Vec<Outbound>,
    pub notice: Option<&'static str>,
}

impl Handlers {
    pub fn new(tmdb: TmdbClient, sessions: SessionStore) -> Self {
        Self { tmdb, sessions }
    }

    pub async fn on_command(&self, chat_id: i64, first_name: Option<&str>, cmd: Command) -> Vec<Outbound> {
        debug!(chat_id, ?cmd, "command");
        match cmd {
            Command::Start | Command::Help => vec![Outbound::Text(format::help_text(first_name))],
            Command::Trailer(query) => {
                let res = self.trailer(&query).await;
                self.or_error_reply(chat_id, "trailer", res)
            }
            Command::Recommend(genre) => {
                let res = self.recommend(chat_id, &genre).await;
                self.or_error_reply(chat_id, "recommendations", res)
            }
        }
    }

    pub async fn on_nav(&self, chat_id: i64, dir: Direction) -> NavReply {
        match self.sessions.advance(chat_id, dir).await {
            Some(view) => {
                debug!(chat_id, ?dir, genre = %view.genre, page = view.number, "navigate");
                NavReply { messages: format::page(&view), notice: None }
            }
            None => NavReply { messages: Vec::new(), notice: Some(NO_ACTIVE_SESSION) },
        }
    }

    async fn trailer(&self, query: &str) -> Result<Vec<Outbound>, BotError> {
        let movies = self.tmdb.search_by_title(query).await?;
        let movie = movies.into_iter().next().ok_or(BotError::NotFound)?;
        let videos = self.tmdb.list_videos(movie.id).await?;
        Ok(format::trailer_reply(&movie, pick_trailer(&videos)))
    }

    async fn recommend(&self, chat_id: i64, input: &str) -> Result<Vec<Outbound>, BotError> {
        let genre = Genre::resolve(input).ok_or_else(|| BotError::UnknownGenre(input.to_string()))?;
        let movies = self.tmdb.discover_by_genre(genre.tmdb_id(), 1).await?;
        info!(chat_id, %genre, found = movies.len(), "recommendations fetched");
        let first = self.sessions.start_session(chat_id, genre, movies).await;
        Ok(format::page(&first))
    }

    fn or_error_reply(&self, chat_id: i64, action: &str, res: Result<Vec<Outbound>, BotError>) -> Vec<Outbound> {
        match res {
            Ok(out) => out,
            Err(e) => {
                if let BotError::Provider(ref cause) = e {
                    error!(chat_id, action, error = %cause, "provider request failed");
                }
                vec![Outbound::Text(e.user_message(action))]
            }
        }
    }
}
