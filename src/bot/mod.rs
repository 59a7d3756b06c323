pub mod format;
pub mod menu;
pub mod upload;

use crate::agent::RelayAgent;
use crate::config::{ prompt, RelayConfig };
use crate::error::RelayError;
use format::{ chat_reply, AnswerView };
use menu::{ menu_keyboard, Command, MenuAction };
use upload::{ is_source_file, staging_name, write_corrected_copy };

use log::{ debug, error, info, warn };
use std::sync::Arc;
use teloxide::{
    dispatching::{ Dispatcher, UpdateFilterExt },
    dptree,
    error_handlers::LoggingErrorHandler,
    net::Download,
    prelude::*,
    types::{ InputFile, ParseMode },
    utils::command::BotCommands,
};
use tokio::io::AsyncWriteExt;

type HandlerResult = Result<(), RelayError>;

#[allow(deprecated)]
fn legacy_markdown() -> ParseMode {
    ParseMode::Markdown
}

/// History is keyed by chat so that the clear button and the chat flow
/// always address the same records.
fn history_key(chat_id: ChatId) -> i64 {
    chat_id.0
}

fn is_plain_text(msg: &Message) -> bool {
    msg.text().map(|text| !text.starts_with('/')).unwrap_or(false)
}

pub async fn run_bot(config: Arc<RelayConfig>, agent: Arc<RelayAgent>) -> Result<(), RelayError> {
    let bot = Bot::new(config.bot_token.clone());

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(dptree::entry().filter_command::<Command>().endpoint(show_menu))
                .branch(
                    dptree::filter(|msg: Message| msg.document().is_some()).endpoint(handle_document)
                )
                .branch(dptree::filter(|msg: Message| is_plain_text(&msg)).endpoint(handle_text))
        )
        .branch(Update::filter_callback_query().endpoint(handle_menu_selection));

    info!("Starting dispatcher with long polling...");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![agent, config])
        .default_handler(|upd| async move {
            debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("Error in bot handler"))
        .enable_ctrlc_handler()
        .build()
        .dispatch().await;

    warn!("Dispatcher stopped");
    Ok(())
}

async fn show_menu(bot: Bot, msg: Message) -> HandlerResult {
    info!("Menu requested in chat {}", msg.chat.id);
    bot.send_message(msg.chat.id, prompt::MENU_TITLE).reply_markup(menu_keyboard()).await?;
    Ok(())
}

async fn handle_menu_selection(
    bot: Bot,
    query: CallbackQuery,
    agent: Arc<RelayAgent>
) -> HandlerResult {
    bot.answer_callback_query(&query.id).await?;

    let Some(message) = query.message.as_ref() else {
        warn!("Callback from {} has no message attached", query.from.id.0);
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let data = query.data.as_deref().unwrap_or_default();
    info!("Menu selection in chat {}: {:?}", chat_id, data);

    match MenuAction::from_callback_data(data) {
        Some(MenuAction::About) => {
            bot
                .edit_message_text(chat_id, message_id, prompt::ABOUT_TEXT)
                .parse_mode(legacy_markdown()).await?;
        }
        Some(MenuAction::Clear) => {
            agent.clear_history(history_key(chat_id)).await?;
            bot.edit_message_text(chat_id, message_id, prompt::HISTORY_CLEARED).await?;
        }
        _ => {
            bot.edit_message_text(chat_id, message_id, prompt::SEND_PROMPT).await?;
        }
    }

    Ok(())
}

async fn send_reply(bot: &Bot, chat_id: ChatId, reply: AnswerView) -> HandlerResult {
    match reply {
        AnswerView::TooLong => {
            info!("Answer for {} exceeds the display limit", chat_id);
            bot.send_message(chat_id, prompt::TOO_LONG).await?;
        }
        AnswerView::Content(text) => {
            bot.send_message(chat_id, text).parse_mode(legacy_markdown()).await?;
        }
        AnswerView::Notice(text) => {
            bot.send_message(chat_id, text).await?;
        }
    }
    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    agent: Arc<RelayAgent>,
    config: Arc<RelayConfig>
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    info!("Message from chat {} ({} chars)", chat_id, text.chars().count());

    let pending = bot.send_message(chat_id, prompt::WORKING).await?;
    let result = agent.process_message(history_key(chat_id), text).await;

    if let Err(e) = bot.delete_message(chat_id, pending.id).await {
        warn!("Failed to delete progress message in {}: {}", chat_id, e);
    }
    if let Err(e) = &result {
        error!("Chat flow failed for {}: {}", chat_id, e);
    }

    let (long_limit, max_len) = (config.long_response_limit, config.max_message_length);
    if let Err(e) = send_reply(&bot, chat_id, chat_reply(&result, long_limit, max_len)).await {
        error!("Failed to deliver reply to {}: {}", chat_id, e);
        send_reply(&bot, chat_id, chat_reply(&Err(e), long_limit, max_len)).await?;
    }

    Ok(())
}

async fn handle_document(bot: Bot, msg: Message, config: Arc<RelayConfig>) -> HandlerResult {
    let Some(doc) = msg.document() else {
        return Ok(());
    };
    let file_name = staging_name(doc.file_name.as_deref());
    info!("Document {} received in chat {}", file_name, msg.chat.id);

    tokio::fs::create_dir_all(&config.downloads_dir).await?;
    let download_path = config.downloads_dir.join(&file_name);

    let file = bot.get_file(doc.file.id.clone()).await?;
    let mut dst = tokio::fs::File::create(&download_path).await?;
    bot.download_file(&file.path, &mut dst).await?;
    dst.flush().await?;

    if is_source_file(&file_name, &config.source_extensions) {
        let corrected = write_corrected_copy(&download_path, &config.output_dir, &file_name).await?;
        bot
            .send_document(msg.chat.id, InputFile::file(corrected))
            .caption(prompt::CORRECTED_CAPTION).await?;
    } else {
        bot.send_message(msg.chat.id, prompt::FILE_RECEIVED).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_keyed_by_chat() {
        assert_eq!(history_key(ChatId(123)), 123);
        assert_eq!(history_key(ChatId(-42)), -42);
    }
}
