use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::metrics::{self, MetricKind};
use crate::workflow::{self, Keyboard, Render, SELECT_DATABASE_FIRST};

use super::super::helpers::{acquire_command_slot, edit_render, send_render};

pub(crate) async fn handle_metrics(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let render = {
        let mut sessions = app_context.sessions.lock().await;
        workflow::open_metric_menu(sessions.session_mut(msg.chat.id))
    };
    send_render(bot, msg.chat.id, &render).await
}

pub(crate) async fn handle_metric_chosen(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    kind: MetricKind,
) -> ResponseResult<()> {
    let selected = {
        let sessions = app_context.sessions.lock().await;
        sessions.selected_database(msg.chat.id)
    };
    let Some(database) = selected else {
        return edit_render(bot, msg.chat.id, msg.id, &guidance_render()).await;
    };

    let Some(_permit) = acquire_command_slot(&app_context.command_slots, msg, bot).await? else {
        return Ok(());
    };
    let text = match metrics::evaluate(app_context.gateway.as_ref(), kind, &database).await {
        Ok(value) => metrics::format_metric_result(&database, &value),
        Err(error) => {
            log::error!("metric {:?} failed for {}: {}", kind, database, error);
            kind.unavailable_text().to_string()
        }
    };

    // The operator may have cleared or switched the selection while the
    // query was in flight; the snapshot is only used if it is still current.
    let render = {
        let mut sessions = app_context.sessions.lock().await;
        let session = sessions.session_mut(msg.chat.id);
        if session.selection.database() == Some(database.as_str()) {
            workflow::metric_result(session, kind, text)
        } else {
            guidance_render()
        }
    };
    edit_render(bot, msg.chat.id, msg.id, &render).await
}

pub(crate) async fn handle_back(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let render = {
        let mut sessions = app_context.sessions.lock().await;
        workflow::back_from_result(sessions.session_mut(msg.chat.id))
    };
    match render {
        Some(render) => edit_render(bot, msg.chat.id, msg.id, &render).await,
        None => Ok(()),
    }
}

fn guidance_render() -> Render {
    Render {
        text: SELECT_DATABASE_FIRST.to_string(),
        keyboard: Keyboard::None,
    }
}
