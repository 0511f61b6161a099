use std::path::PathBuf;

use teloxide::{prelude::*, types::InputFile};

use crate::app_context::AppContext;

pub(crate) async fn handle_sendlog(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let path = PathBuf::from(&app_context.config.log.path);
    if !path.is_file() {
        bot.send_message(msg.chat.id, "Log file not found.").await?;
        return Ok(());
    }

    bot.send_document(msg.chat.id, InputFile::file(path)).await?;
    Ok(())
}
