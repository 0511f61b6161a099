use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::gateway::DatabaseGateway;
use crate::selection::OperatorSession;
use crate::workflow::{self, Keyboard, Render};

use super::super::helpers::{edit_render, send_render};

const DATABASE_LIST_ERROR: &str = "An error occurred while retrieving database list.";

pub(crate) async fn handle_database(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let render = listing_render(app_context, msg.chat.id, workflow::database_listing).await;
    send_render(bot, msg.chat.id, &render).await
}

pub(crate) async fn handle_select_db(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    name: &str,
) -> ResponseResult<()> {
    let render = {
        let mut sessions = app_context.sessions.lock().await;
        workflow::choose_database(sessions.session_mut(msg.chat.id), name)
    };
    edit_render(bot, msg.chat.id, msg.id, &render).await
}

pub(crate) async fn handle_back_db(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let went_back = {
        let mut sessions = app_context.sessions.lock().await;
        workflow::back_to_database_list(sessions.session_mut(msg.chat.id))
    };
    if !went_back {
        return Ok(());
    }

    let render = listing_render(app_context, msg.chat.id, workflow::relist_databases).await;
    edit_render(bot, msg.chat.id, msg.id, &render).await
}

async fn listing_render(
    app_context: &AppContext,
    chat_id: ChatId,
    list: fn(&mut OperatorSession, Vec<String>) -> Render,
) -> Render {
    match app_context.gateway.list_databases().await {
        Ok(names) => {
            let mut sessions = app_context.sessions.lock().await;
            list(sessions.session_mut(chat_id), names)
        }
        Err(error) => {
            log::error!("database listing failed: {}", error);
            Render {
                text: DATABASE_LIST_ERROR.to_string(),
                keyboard: Keyboard::None,
            }
        }
    }
}
