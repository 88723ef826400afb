use crate::command::{nav_callback, parse_command, parse_nav, Command};
use crate::format::{nav_label, Outbound};
use crate::handlers::Handlers;
use crate::session::Direction;
use once_cell::sync::Lazy;
use std::time::Duration;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    prelude::*,
    types::{CallbackQuery, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Me, ParseMode},
    utils::command::BotCommands,
};
use tracing::{trace, warn};

/* ====== HTTP-клиент для постеров (общий на процесс) ====== */
static POSTER_HTTP: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent("Mozilla/5.0 (compatible; tg-movie-bot/1.0)")
        .build()
        .unwrap_or_default()
});

pub async fn run(bot: Bot, handlers: Handlers) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "failed to register bot commands");
    }

    let update_handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_map(|msg: Message, me: Me| parse_command(msg.text()?, me.username()))
                .endpoint({
                    let handlers = handlers.clone();
                    move |bot: Bot, msg: Message, cmd: Command| {
                        let handlers = handlers.clone();
                        async move { on_command(bot, msg, cmd, &handlers).await }
                    }
                }),
        )
        .branch(Update::filter_callback_query().endpoint({
            let handlers = handlers.clone();
            move |bot: Bot, q: CallbackQuery| {
                let handlers = handlers.clone();
                async move { on_callback(bot, q, &handlers).await }
            }
        }));

    Dispatcher::builder(bot, update_handler)
        // обычный текст и незнакомые команды молча пропускаем
        .default_handler(|upd| async move { trace!(update_id = ?upd.id, "ignored update") })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

/* ====== Команды ====== */
async fn on_command(bot: Bot, msg: Message, cmd: Command, handlers: &Handlers) -> ResponseResult<()> {
    let first_name = msg.from.as_ref().map(|u| u.first_name.as_str());
    let out = handlers.on_command(msg.chat.id.0, first_name, cmd).await;
    send_all(&bot, msg.chat.id, out).await;
    Ok(())
}

/* ====== Callback-кнопки: nav:next / nav:prev ======
   На callback отвечаем всегда, иначе у клиента висит «часики». */
async fn on_callback(bot: Bot, q: CallbackQuery, handlers: &Handlers) -> ResponseResult<()> {
    let chat_id = q.message.as_ref().map(|m| m.chat().id);
    let dir = q.data.as_deref().and_then(parse_nav);

    let notice = match (chat_id, dir) {
        (Some(chat), Some(dir)) => {
            let reply = handlers.on_nav(chat.0, dir).await;
            send_all(&bot, chat, reply.messages).await;
            reply.notice
        }
        _ => None,
    };
    answer_cb(&bot, &q, notice).await
}

/// Отказ Telegram на одно сообщение не должен съедать остаток страницы.
async fn send_all(bot: &Bot, chat: ChatId, out: Vec<Outbound>) {
    for o in out {
        if let Err(e) = send_one(bot, chat, o).await {
            warn!(chat_id = chat.0, error = %e, "failed to send message, continuing");
        }
    }
}

async fn send_one(bot: &Bot, chat: ChatId, o: Outbound) -> ResponseResult<()> {
    match o {
        Outbound::Text(text) => {
            bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;
        }
        Outbound::Photo { url, caption } => send_poster(bot, chat, &url, caption).await?,
        Outbound::Navigation { page } => {
            bot.send_message(chat, nav_label(page)).reply_markup(nav_keyboard()).await?;
        }
    }
    Ok(())
}

/// Постер тянем байтами; не вышло — шлём ту же подпись текстом.
async fn send_poster(bot: &Bot, chat: ChatId, url: &str, caption: String) -> ResponseResult<()> {
    match fetch_image(url).await {
        Ok(bytes) => {
            bot.send_photo(chat, InputFile::memory(bytes).file_name("poster.jpg"))
                .caption(caption)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Err(e) => {
            warn!(%url, error = %e, "poster download failed, sending text only");
            bot.send_message(chat, caption).parse_mode(ParseMode::Html).await?;
        }
    }
    Ok(())
}

/* ====== Кнопки ====== */
pub fn nav_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("⏮️ Prev", nav_callback(Direction::Prev)),
        InlineKeyboardButton::callback("⏭️ Next", nav_callback(Direction::Next)),
    ]])
}

async fn answer_cb(bot: &Bot, q: &CallbackQuery, text: Option<&str>) -> ResponseResult<()> {
    let mut req = bot.answer_callback_query(q.id.clone()).show_alert(false);
    if let Some(t) = text {
        req = req.text(t);
    }
    req.await?;
    Ok(())
}

/* ====== Загрузка постера байтами (устойчиво к редиректам/CDN) ====== */
async fn fetch_image(url: &str) -> anyhow::Result<Vec<u8>> {
    let resp = POSTER_HTTP
        .get(url)
        .header(reqwest::header::ACCEPT, "image/*")
        .send()
        .await?;
    if !resp.status().is_success() {
        anyhow::bail!("status {}", resp.status());
    }
    if let Some(ct) = resp.headers().get(reqwest::header::CONTENT_TYPE) {
        let ct = ct.to_str().unwrap_or("");
        if !ct.starts_with("image/") {
            anyhow::bail!("unexpected content-type: {ct}");
        }
    }
    Ok(resp.bytes().await?.to_vec())
}
