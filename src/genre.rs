use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Жанры, которые понимает `/recommend`, с их id в TMDB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    SciFi,
    Romance,
}

static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("separator regex should compile"));

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::Romance,
        Genre::SciFi,
    ];

    pub fn tmdb_id(self) -> u32 {
        match self {
            Genre::Action => 28,
            Genre::Comedy => 35,
            Genre::Drama => 18,
            Genre::Horror => 27,
            Genre::SciFi => 878,
            Genre::Romance => 10749,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Genre::Action => "action",
            Genre::Comedy => "comedy",
            Genre::Drama => "drama",
            Genre::Horror => "horror",
            Genre::SciFi => "scifi",
            Genre::Romance => "romance",
        }
    }

    /// "Sci-Fi", "sci fi" и "SCIFI" дают один и тот же жанр.
    pub fn resolve(input: &str) -> Option<Genre> {
        match normalize(input).as_str() {
            "action" => Some(Genre::Action),
            "comedy" => Some(Genre::Comedy),
            "drama" => Some(Genre::Drama),
            "horror" => Some(Genre::Horror),
            "scifi" | "sciencefiction" => Some(Genre::SciFi),
            "romance" => Some(Genre::Romance),
            _ => None,
        }
    }

    /// "action, comedy, drama, horror, romance, scifi"
    pub fn known_names() -> String {
        Genre::ALL.iter().map(|g| g.name()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(input: &str) -> String {
    SEPARATORS.replace_all(input.trim(), "").to_lowercase()
}
