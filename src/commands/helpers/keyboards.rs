use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};

use crate::metrics::MetricKind;
use crate::workflow::{BACK_TO_DATABASES, BACK_TO_METRICS, Keyboard, Render, SELECT_DB_PREFIX};

fn keyboard_markup(keyboard: &Keyboard) -> Option<InlineKeyboardMarkup> {
    match keyboard {
        Keyboard::None => None,
        Keyboard::Databases(names) => Some(InlineKeyboardMarkup::new(names.iter().map(|name| {
            vec![InlineKeyboardButton::callback(
                name.clone(),
                format!("{}{}", SELECT_DB_PREFIX, name),
            )]
        }))),
        Keyboard::Metrics => Some(InlineKeyboardMarkup::new(MetricKind::ALL.into_iter().map(
            |kind| {
                vec![InlineKeyboardButton::callback(
                    kind.label(),
                    kind.callback_data(),
                )]
            },
        ))),
        Keyboard::BackToMetrics => Some(back_markup(BACK_TO_METRICS)),
        Keyboard::BackToDatabases => Some(back_markup(BACK_TO_DATABASES)),
    }
}

fn back_markup(callback_data: &'static str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback("Back", callback_data)]])
}

pub(crate) async fn send_render(bot: &Bot, chat_id: ChatId, render: &Render) -> ResponseResult<()> {
    let request = bot.send_message(chat_id, render.text.clone());
    match keyboard_markup(&render.keyboard) {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };
    Ok(())
}

/// Button presses edit the menu message in place, like the dialog the
/// buttons came from.
pub(crate) async fn edit_render(
    bot: &Bot,
    chat_id: ChatId,
    message_id: MessageId,
    render: &Render,
) -> ResponseResult<()> {
    let request = bot.edit_message_text(chat_id, message_id, render.text.clone());
    match keyboard_markup(&render.keyboard) {
        Some(markup) => request.reply_markup(markup).await?,
        None => request.await?,
    };
    Ok(())
}
