use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::jobs::start_monitor_job;

pub(crate) const WELCOME: &str = "Hello! I'm your PostgreSQL database monitoring bot";

/// Welcomes the operator and registers the periodic alert checks for this
/// chat. Repeating /start replaces the previous registration instead of
/// stacking a second loop.
pub(crate) async fn handle_start(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    bot.send_message(msg.chat.id, WELCOME).await?;

    let handle = start_monitor_job(bot.clone(), app_context.clone(), msg.chat.id);
    let mut monitors = app_context.monitors.lock().await;
    let restarted = monitors.is_running(msg.chat.id);
    monitors.register(msg.chat.id, handle);
    if restarted {
        log::info!("alert monitoring restarted for chat {}", msg.chat.id.0);
    } else {
        log::info!("alert monitoring registered for chat {}", msg.chat.id.0);
    }
    Ok(())
}

pub(crate) async fn handle_stop(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let stopped = app_context.monitors.lock().await.stop(msg.chat.id);
    let reply = if stopped {
        log::info!("alert monitoring stopped for chat {}", msg.chat.id.0);
        "Monitoring stopped."
    } else {
        "Monitoring is not active. Use /start to begin monitoring."
    };
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
