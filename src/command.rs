use teloxide::utils::command::BotCommands;

use crate::session::Direction;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Commands:")]
pub enum Command {
    #[command(description = "how to use the bot")]
    Start,
    #[command(description = "same as /start")]
    Help,
    #[command(description = "trailer, rating and overview: /trailer <movie name>")]
    Trailer(String),
    #[command(description = "popular movies in a genre: /recommend <genre>")]
    Recommend(String),
}

/// Текст сообщения → команда. Всё, что не команда (или команда без
/// обязательного аргумента), даёт `None` и молча игнорируется.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    match Command::parse(text, bot_username).ok()? {
        Command::Trailer(q) => non_empty(q).map(Command::Trailer),
        Command::Recommend(g) => non_empty(g).map(Command::Recommend),
        cmd => Some(cmd),
    }
}

fn non_empty(arg: String) -> Option<String> {
    let arg = arg.trim();
    (!arg.is_empty()).then(|| arg.to_string())
}

/* ====== Callback-данные кнопок ======
   nav:next — следующая страница подборки
   nav:prev — предыдущая */
const NAV_PREFIX: &str = "nav:";

pub fn nav_callback(dir: Direction) -> String {
    let d = match dir {
        Direction::Next => "next",
        Direction::Prev => "prev",
    };
    format!("{NAV_PREFIX}{d}")
}

pub fn parse_nav(data: &str) -> Option<Direction> {
    match data.strip_prefix(NAV_PREFIX)? {
        "next" => Some(Direction::Next),
        "prev" => Some(Direction::Prev),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "moviebot";

    #[test]
    fn parses_known_commands() {
        assert_eq!(parse_command("/start", BOT), Some(Command::Start));
        assert_eq!(parse_command("/help", BOT), Some(Command::Help));
        assert_eq!(
            parse_command("/trailer Dune Part Two", BOT),
            Some(Command::Trailer("Dune Part Two".into()))
        );
        assert_eq!(
            parse_command("/recommend@moviebot  Sci Fi ", BOT),
            Some(Command::Recommend("Sci Fi".into()))
        );
    }

    #[test]
    fn unknown_or_incomplete_input_is_ignored() {
        assert_eq!(parse_command("/weather", BOT), None);
        assert_eq!(parse_command("hello there", BOT), None);
        assert_eq!(parse_command("/trailer", BOT), None);
        assert_eq!(parse_command("/recommend   ", BOT), None);
        assert_eq!(parse_command("/trailer@otherbot Dune", BOT), None);
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(parse_command("/Trailer Dune", BOT), None);
    }

    #[test]
    fn nav_callback_round_trip() {
        for dir in [Direction::Next, Direction::Prev] {
            assert_eq!(parse_nav(&nav_callback(dir)), Some(dir));
        }
        assert_eq!(nav_callback(Direction::Next), "nav:next");
    }

    #[test]
    fn foreign_callback_data_rejected() {
        assert_eq!(parse_nav("next"), None);
        assert_eq!(parse_nav("nav:up"), None);
        assert_eq!(parse_nav("add:42"), None);
    }
}
