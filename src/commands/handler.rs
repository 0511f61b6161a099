use std::sync::Arc;

use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::metrics::MetricKind;
use crate::workflow::{BACK_TO_DATABASES, BACK_TO_METRICS, SELECT_DB_PREFIX};

use super::command_def::MyCommands;
use super::features::{
    database::{handle_back_db, handle_select_db},
    help::handle_unknown,
    metrics_menu::{handle_back, handle_metric_chosen},
};
use super::helpers::is_authorized;
use super::router::route_command;

pub async fn answer(
    bot: Bot,
    msg: Message,
    cmd: MyCommands,
    app_context: Arc<AppContext>,
) -> ResponseResult<()> {
    if !is_authorized(&msg, &app_context.config) {
        log_unauthorized(&msg);
        return Ok(());
    }
    route_command(bot, msg, cmd, &app_context).await
}

pub async fn answer_callback(
    bot: Bot,
    q: CallbackQuery,
    app_context: Arc<AppContext>,
) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let msg = match q.message {
        Some(msg) => msg,
        None => return Ok(()),
    };

    let data = match q.data {
        Some(data) => data,
        None => return Ok(()),
    };

    let authorized = app_context
        .config
        .owner_user_id()
        .map(|id| id == q.from.id)
        .unwrap_or(false);
    if !authorized {
        return Ok(());
    }

    if let Some(name) = data.strip_prefix(SELECT_DB_PREFIX) {
        return handle_select_db(&bot, &msg, &app_context, name).await;
    }
    if data == BACK_TO_METRICS {
        return handle_back(&bot, &msg, &app_context).await;
    }
    if data == BACK_TO_DATABASES {
        return handle_back_db(&bot, &msg, &app_context).await;
    }
    if let Some(kind) = MetricKind::from_callback_data(&data) {
        return handle_metric_chosen(&bot, &msg, &app_context, kind).await;
    }

    log::warn!("unrecognized callback data: {:?}", data);
    Ok(())
}

/// Messages that did not parse as a command still get a reply, so the chat
/// never looks dead.
pub async fn answer_unknown(
    bot: Bot,
    msg: Message,
    app_context: Arc<AppContext>,
) -> ResponseResult<()> {
    if !is_authorized(&msg, &app_context.config) {
        log_unauthorized(&msg);
        return Ok(());
    }
    handle_unknown(&bot, &msg, &app_context).await
}

fn log_unauthorized(msg: &Message) {
    let user_id = msg
        .from()
        .map(|user| user.id.0.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    log::warn!(
        "SECURITY: unauthorized access attempt. user_id={} chat_id={} text={:?}",
        user_id,
        msg.chat.id.0,
        msg.text()
    );
}
