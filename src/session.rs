use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Mutex;

use crate::genre::Genre;
use crate::tmdb::Movie;

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Последняя подборка чата и текущая страница (с нуля).
#[derive(Debug, Clone)]
pub struct Session {
    genre: Genre,
    page: usize,
    results: Vec<Movie>,
}

/// Срез подборки, который уходит в чат.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub genre: Genre,
    pub number: usize,
    pub movies: Vec<Movie>,
}

impl Session {
    pub fn new(genre: Genre, results: Vec<Movie>) -> Self {
        Self { genre, page: 0, results }
    }

    /// Число непустых страниц.
    pub fn page_count(&self) -> usize {
        self.results.len().div_ceil(PAGE_SIZE)
    }

    /// `Next` уходит не дальше первой пустой страницы, `Prev` не ниже нуля.
    pub fn advance(&mut self, dir: Direction) {
        match dir {
            Direction::Next if self.page < self.page_count() => self.page += 1,
            Direction::Prev if self.page > 0 => self.page -= 1,
            _ => {}
        }
    }

    pub fn current_slice(&self) -> &[Movie] {
        let start = (self.page * PAGE_SIZE).min(self.results.len());
        let end = (start + PAGE_SIZE).min(self.results.len());
        &self.results[start..end]
    }

    pub fn view(&self) -> PageView {
        PageView { genre: self.genre, number: self.page, movies: self.current_slice().to_vec() }
    }
}

/// Сессии по чатам. Каждая за своим мьютексом, чтобы два быстрых нажатия
/// "Next" не потеряли обновление; простаивающие вытесняются по TTL.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<i64, Arc<Mutex<Session>>>,
}

impl SessionStore {
    pub fn new(idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(100_000)
            .time_to_idle(idle)
            .build();
        Self { sessions }
    }

    /// Заменяет сессию чата целиком и отдаёт первую страницу. Страницу
    /// собираем до вставки: запись в кэше может исчезнуть сразу (TTL).
    pub async fn start_session(&self, chat_id: i64, genre: Genre, results: Vec<Movie>) -> PageView {
        let session = Session::new(genre, results);
        let first = session.view();
        self.sessions.insert(chat_id, Arc::new(Mutex::new(session))).await;
        first
    }

    /// `None`, если у чата нет сессии (не было /recommend или вытеснена).
    pub async fn advance(&self, chat_id: i64, dir: Direction) -> Option<PageView> {
        let entry = self.sessions.get(&chat_id).await?;
        let mut session = entry.lock().await;
        session.advance(dir);
        Some(session.view())
    }

    #[allow(dead_code)]
    pub async fn current_slice(&self, chat_id: i64) -> Option<PageView> {
        let entry = self.sessions.get(&chat_id).await?;
        let session = entry.lock().await;
        Some(session.view())
    }
}
