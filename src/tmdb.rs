use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;

use crate::error::ProviderError;

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { api_key, base_url, http })
    }

    /// Популярные фильмы жанра, одна страница TMDB (page с 1).
    pub async fn discover_by_genre(&self, genre_id: u32, page: u32) -> Result<Vec<Movie>, ProviderError> {
        let url = format!(
            "{}/discover/movie?api_key={}&with_genres={}&sort_by=popularity.desc&page={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            genre_id,
            page
        );
        let data: Page<Movie> = self.get_json("discover/movie", url).await?;
        Ok(data.results)
    }

    /// Поиск по названию; порядок TMDB не трогаем.
    pub async fn search_by_title(&self, query: &str) -> Result<Vec<Movie>, ProviderError> {
        let url = format!(
            "{}/search/movie?api_key={}&query={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query)
        );
        let data: Page<Movie> = self.get_json("search/movie", url).await?;
        Ok(data.results)
    }

    pub async fn list_videos(&self, movie_id: u64) -> Result<Vec<Video>, ProviderError> {
        let url = format!(
            "{}/movie/{}/videos?api_key={}",
            self.base_url,
            movie_id,
            urlencoding::encode(&self.api_key)
        );
        let data: Page<Video> = self.get_json("movie/videos", url).await?;
        Ok(data.results)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &'static str, url: String) -> Result<T, ProviderError> {
        debug!(endpoint, "tmdb request");
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ProviderError::Transport { endpoint, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ProviderError::Status { endpoint, status });
        }
        let body = resp
            .bytes()
            .await
            .map_err(|source| ProviderError::Transport { endpoint, source })?;
        serde_json::from_slice(&body).map_err(|source| ProviderError::Payload { endpoint, source })
    }
}

/// Первый YouTube-ролик типа Trailer или Teaser, в порядке TMDB.
pub fn pick_trailer(videos: &[Video]) -> Option<&Video> {
    videos
        .iter()
        .find(|v| matches!(v.kind, VideoKind::Trailer | VideoKind::Teaser) && v.site == VideoSite::YouTube)
}

/* ======= DTOs ======= */

#[derive(Deserialize, Debug)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl Movie {
    /// Год из "YYYY-MM-DD"; TMDB присылает "" для фильмов без даты.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.trim().is_empty())
    }

    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{POSTER_BASE_URL}{p}"))
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Video {
    pub key: String,
    pub site: VideoSite,
    #[serde(rename = "type")]
    pub kind: VideoKind,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoKind {
    Trailer,
    Teaser,
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSite {
    YouTube,
    #[serde(other)]
    Other,
}
