use teloxide::prelude::*;

use crate::app_context::AppContext;

use super::command_def::MyCommands;
use super::features::{
    database::handle_database,
    help::handle_help,
    logfile::handle_sendlog,
    metrics_menu::handle_metrics,
    monitoring::{handle_start, handle_stop},
    resources::{handle_cpu, handle_disk, handle_ram},
    sessions::{handle_active_sessions, handle_checkpoint_restart, handle_kill},
};

pub(super) async fn route_command(
    bot: Bot,
    msg: Message,
    cmd: MyCommands,
    app_context: &AppContext,
) -> ResponseResult<()> {
    match cmd {
        MyCommands::Start => handle_start(&bot, &msg, app_context).await?,
        MyCommands::Stop => handle_stop(&bot, &msg, app_context).await?,
        MyCommands::Help => handle_help(&bot, &msg).await?,
        MyCommands::Database => handle_database(&bot, &msg, app_context).await?,
        MyCommands::Metrics => handle_metrics(&bot, &msg, app_context).await?,
        MyCommands::Activesessions => handle_active_sessions(&bot, &msg, app_context).await?,
        MyCommands::Kill(input) => handle_kill(&bot, &msg, app_context, &input).await?,
        MyCommands::Checkpointrestart => {
            handle_checkpoint_restart(&bot, &msg, app_context).await?
        }
        MyCommands::Cpu => handle_cpu(&bot, &msg, app_context).await?,
        MyCommands::Disk => handle_disk(&bot, &msg, app_context).await?,
        MyCommands::Ram => handle_ram(&bot, &msg, app_context).await?,
        MyCommands::Sendlog => handle_sendlog(&bot, &msg, app_context).await?,
    }

    Ok(())
}
