use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::workflow::SELECT_DATABASE_FIRST;

const HELP_TEXT: &str = "I can help you monitor your PostgreSQL database.

You can control me by sending these commands:

/start - start the bot and alert monitoring
/stop - stop alert monitoring
/help - view help

Database commands
/database - select a database
/metrics - view metrics in the selected database
/checkpointrestart - use checkpoint command and then restart the database

Sessions commands
/activesessions - get a list of active sessions in the selected database
/kill - type session PID to terminate a session in the selected database

Resource commands
/cpu - get CPU usage info
/disk - get disk space info
/ram - get RAM usage info

Bot debugging commands
/sendlog - get the bot's .log file";

pub(crate) async fn handle_help(bot: &Bot, msg: &Message) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}

/// Fallback for slash-texts that did not parse as a known command.
pub(crate) async fn handle_unknown(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }

    let selected = {
        let sessions = app_context.sessions.lock().await;
        sessions.selected_database(msg.chat.id)
    };
    let reply = if selected.is_some() {
        "Sorry, I didn't understand that command. Use /help to view commands."
    } else {
        SELECT_DATABASE_FIRST
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
