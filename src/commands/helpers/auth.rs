use teloxide::prelude::*;

use crate::config::Config;

/// Owner-only bot: the message must come from the configured owner in the
/// owner's direct chat. Anything else, including a valid owner_id writing
/// from a group, is rejected.
pub(crate) fn is_authorized(msg: &Message, config: &Config) -> bool {
    let (Ok(owner_user_id), Ok(owner_chat_id)) =
        (config.owner_user_id(), config.owner_chat_id())
    else {
        return false;
    };

    msg.from().is_some_and(|from| from.id == owner_user_id) && msg.chat.id == owner_chat_id
}
