use unicode_segmentation::UnicodeSegmentation;

use crate::genre::Genre;
use crate::session::PageView;
use crate::tmdb::{Movie, Video};

/// Лимиты описания (в графемах) для подборки и для /trailer.
pub const PAGE_OVERVIEW_LIMIT: usize = 300;
pub const TRAILER_OVERVIEW_LIMIT: usize = 400;

/// Telegram считает длину подписи в UTF-16 (максимум 1024). Описание держим
/// в 700 единицах, остальное — заголовок, рейтинг, ссылка.
pub const CAPTION_LIMIT_UTF16: usize = 1024;
const OVERVIEW_LIMIT_UTF16: usize = 700;

pub const NO_MORE_RESULTS: &str = "❌ No more results.";
pub const TRAILER_NOT_FOUND: &str = "❌ Trailer not found.";

/// Исходящее сообщение; отправкой занимается `tg`.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// HTML-текст.
    Text(String),
    /// Постер по ссылке с HTML-подписью.
    Photo { url: String, caption: String },
    /// "Page N" с кнопками Prev/Next; `page` с нуля.
    Navigation { page: usize },
}

/// Фото, если есть постер, иначе просто текст.
pub fn movie(m: &Movie, overview_limit: usize) -> Outbound {
    card(m, movie_caption(m, overview_limit))
}

/// Ответ на /trailer: карточка фильма и ссылка на ролик (или пометка, что его нет).
pub fn trailer_reply(m: &Movie, trailer: Option<&Video>) -> Vec<Outbound> {
    let link = match trailer {
        Some(v) => format!("<a href=\"{}\">Watch Trailer</a>", html_escape(&v.watch_url())),
        None => TRAILER_NOT_FOUND.to_string(),
    };
    let caption = format!("{}\n\n🔗 {}", movie_caption(m, TRAILER_OVERVIEW_LIMIT), link);
    vec![card(m, caption)]
}

/// Подпись длиннее лимита фото (очень длинное название) уходит текстом.
fn card(m: &Movie, caption: String) -> Outbound {
    match m.poster_url() {
        Some(url) if caption.encode_utf16().count() <= CAPTION_LIMIT_UTF16 => Outbound::Photo { url, caption },
        _ => Outbound::Text(caption),
    }
}

/// По сообщению на фильм и навигация; пустая страница — одно "No more results".
pub fn page(view: &PageView) -> Vec<Outbound> {
    if view.movies.is_empty() {
        return vec![Outbound::Text(NO_MORE_RESULTS.to_string())];
    }
    let mut out: Vec<Outbound> = view
        .movies
        .iter()
        .map(|m| movie(m, PAGE_OVERVIEW_LIMIT))
        .collect();
    out.push(Outbound::Navigation { page: view.number });
    out
}

pub fn movie_caption(m: &Movie, overview_limit: usize) -> String {
    let year = m.year().unwrap_or("N/A");
    let overview = match m.overview.as_deref().map(str::trim) {
        Some(o) if !o.is_empty() => html_escape(&clip(o, overview_limit, OVERVIEW_LIMIT_UTF16)),
        _ => "<i>No overview available.</i>".to_string(),
    };
    format!(
        "🎬 <b>{}</b> ({})\n⭐ <b>Rating:</b> {:.1}/10\n📝 {}",
        html_escape(&m.title),
        html_escape(year),
        m.vote_average,
        overview
    )
}

pub fn nav_label(page: usize) -> String {
    format!("Page {}", page + 1)
}

pub fn help_text(first_name: Option<&str>) -> String {
    let name = first_name.map(html_escape).unwrap_or_else(|| "there".to_string());
    format!(
        "👋 <b>Hi {name}!</b>\n\n\
         Welcome to <b>🎬 MovieBot</b>, your personal movie assistant.\n\n\
         Here's what I can do for you:\n\n\
         🎞️ <b>/trailer &lt;movie name&gt;</b>\n\
         <i>Get the official trailer, rating, overview &amp; poster.</i>\n\n\
         🍿 <b>/recommend &lt;genre&gt;</b>\n\
         <i>Discover popular movies in your favorite genre.</i>\n\n\
         💡 <b>Available genres:</b>\n\
         <i>{genres}</i>\n\n\
         📌 <b>Examples:</b>\n\
         <code>/trailer Dune Part Two</code>\n\
         <code>/recommend scifi</code>",
        genres = Genre::known_names()
    )
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

/// Обрезает по графемам (не режет символы и эмодзи), но не больше
/// `max_utf16` единиц UTF-16, с учётом "…".
pub fn clip(s: &str, max: usize, max_utf16: usize) -> String {
    let mut head = String::new();
    let (mut taken, mut units) = (0, 0);
    for g in s.graphemes(true) {
        let len = g.encode_utf16().count();
        if taken == max || units + len + 1 > max_utf16 {
            return head.trim_end().to_string() + "…";
        }
        head.push_str(g);
        taken += 1;
        units += len;
    }
    head
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tmdb::{VideoKind, VideoSite};

    fn sample(poster: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: "Tom & Jerry <Remastered>".into(),
            release_date: Some("1999-03-31".into()),
            vote_average: 8.216,
            overview: Some("A hacker learns the truth.".into()),
            poster_path: poster.map(String::from),
        }
    }

    #[test]
    fn movie_without_poster_is_text_only() {
        let out = movie(&sample(None), PAGE_OVERVIEW_LIMIT);
        let Outbound::Text(text) = out else { panic!("expected a text message") };
        assert!(text.contains("<b>Tom &amp; Jerry &lt;Remastered&gt;</b>"));
        assert!(text.contains("(1999)"));
        assert!(text.contains("8.2/10"));
        assert!(text.contains("A hacker learns the truth."));
    }

    #[test]
    fn movie_with_poster_is_photo() {
        let out = movie(&sample(Some("/abc.jpg")), PAGE_OVERVIEW_LIMIT);
        assert_eq!(
            out,
            Outbound::Photo {
                url: "https://image.tmdb.org/t/p/w500/abc.jpg".into(),
                caption: movie_caption(&sample(None), PAGE_OVERVIEW_LIMIT),
            }
        );
    }

    #[test]
    fn missing_year_and_overview_use_placeholders() {
        let mut m = sample(None);
        m.release_date = None;
        m.overview = Some("   ".into());
        let caption = movie_caption(&m, 10);
        assert!(caption.contains("(N/A)"));
        assert!(caption.contains("No overview available."));
    }

    #[test]
    fn trailer_link_or_not_found() {
        let v = Video { key: "d9MyW72ELq0".into(), site: VideoSite::YouTube, kind: VideoKind::Trailer };
        let with = trailer_reply(&sample(None), Some(&v));
        let Outbound::Text(text) = &with[0] else { panic!() };
        assert!(text.contains("href=\"https://www.youtube.com/watch?v=d9MyW72ELq0\""));

        let without = trailer_reply(&sample(Some("/p.jpg")), None);
        let Outbound::Photo { caption, .. } = &without[0] else { panic!() };
        assert!(caption.contains(TRAILER_NOT_FOUND));
        assert!(caption.contains("Tom &amp; Jerry"));
    }

    #[test]
    fn clip_respects_grapheme_boundaries() {
        assert_eq!(clip("short", 10, 100), "short");
        assert_eq!(clip("Привет, мир", 6, 100), "Привет…");
        assert_eq!(clip("👨‍👩‍👧‍👦👍🏽ok", 2, 100), "👨‍👩‍👧‍👦👍🏽…");
        assert_eq!(clip("exactly", 7, 100), "exactly");
    }

    #[test]
    fn clip_respects_utf16_budget() {
        // каждая графема — буква + 3 комбинирующих знака = 4 единицы UTF-16
        let heavy = "a\u{301}\u{302}\u{303}".repeat(400);
        let out = clip(&heavy, TRAILER_OVERVIEW_LIMIT, 700);
        assert!(out.ends_with('…'));
        assert!(out.encode_utf16().count() <= 700);
        assert_eq!(out.graphemes(true).count(), 175);
    }

    #[test]
    fn trailer_caption_fits_photo_limit() {
        let mut m = sample(Some("/p.jpg"));
        m.overview = Some("o\u{308}\u{323}\u{331}".repeat(500));
        let v = Video { key: "k".into(), site: VideoSite::YouTube, kind: VideoKind::Trailer };
        let Outbound::Photo { caption, .. } = &trailer_reply(&m, Some(&v))[0] else { panic!("expected a photo") };
        assert!(caption.encode_utf16().count() <= CAPTION_LIMIT_UTF16);
    }

    #[test]
    fn oversized_caption_falls_back_to_text() {
        let mut m = sample(Some("/p.jpg"));
        m.title = "T".repeat(1100);
        assert!(matches!(movie(&m, PAGE_OVERVIEW_LIMIT), Outbound::Text(_)));
    }

    #[test]
    fn long_overview_is_clipped() {
        let mut m = sample(None);
        m.overview = Some("é".repeat(500));
        let caption = movie_caption(&m, PAGE_OVERVIEW_LIMIT);
        assert!(caption.ends_with('…'));
        assert_eq!(caption.matches('é').count(), PAGE_OVERVIEW_LIMIT);
    }

    #[test]
    fn page_has_one_message_per_movie_then_nav() {
        let view = PageView {
            genre: Genre::Drama,
            number: 1,
            movies: vec![sample(None), sample(Some("/x.jpg"))],
        };
        let out = page(&view);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], Outbound::Text(_)));
        assert!(matches!(out[1], Outbound::Photo { .. }));
        assert_eq!(out[2], Outbound::Navigation { page: 1 });
        assert_eq!(nav_label(1), "Page 2");
    }

    #[test]
    fn empty_page_is_single_no_more_results() {
        let view = PageView { genre: Genre::Drama, number: 3, movies: vec![] };
        assert_eq!(page(&view), vec![Outbound::Text(NO_MORE_RESULTS.to_string())]);
    }

    #[test]
    fn help_greets_by_name() {
        let text = help_text(Some("Ann<"));
        assert!(text.starts_with("👋 <b>Hi Ann&lt;!</b>"));
        assert!(text.contains("/recommend &lt;genre&gt;"));
        assert!(help_text(None).contains("Hi there!"));
    }
}
