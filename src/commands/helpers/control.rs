use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{InputFile, ParseMode},
};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::formatting::{as_html_block, escaped_len};

const TELEGRAM_FILE_FALLBACK_THRESHOLD: usize = 3900;

/// Limits how many database-touching commands run at once so a burst of
/// commands cannot pile up unbounded concurrent queries.
pub(crate) async fn acquire_command_slot(
    command_slots: &Arc<Semaphore>,
    msg: &Message,
    bot: &Bot,
) -> ResponseResult<Option<OwnedSemaphorePermit>> {
    match command_slots.clone().acquire_owned().await {
        Ok(permit) => Ok(Some(permit)),
        Err(error) => {
            log::error!("failed to acquire command semaphore: {}", error);
            bot.send_message(
                msg.chat.id,
                as_html_block(
                    "Command queue error",
                    "Could not acquire command slot. Please try again.",
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            Ok(None)
        }
    }
}

/// Session listings can outgrow a Telegram message; fall back to a document.
pub(crate) async fn send_html_or_file(
    bot: &Bot,
    chat_id: ChatId,
    title: &str,
    body: &str,
) -> ResponseResult<()> {
    if escaped_len(body) <= TELEGRAM_FILE_FALLBACK_THRESHOLD {
        bot.send_message(chat_id, as_html_block(title, body))
            .parse_mode(ParseMode::Html)
            .await?;
        return Ok(());
    }

    bot.send_message(
        chat_id,
        as_html_block(
            title,
            "Output is too long for a Telegram message. Sent as file attachment.",
        ),
    )
    .parse_mode(ParseMode::Html)
    .await?;

    let file_name = format!("{}-output.txt", title.to_lowercase().replace([' ', '/'], "-"));
    bot.send_document(
        chat_id,
        InputFile::memory(body.as_bytes().to_vec()).file_name(file_name),
    )
    .await?;

    Ok(())
}
