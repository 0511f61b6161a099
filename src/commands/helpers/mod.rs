mod auth;
mod control;
mod formatting;
mod keyboards;

pub(super) use auth::is_authorized;
pub(super) use control::{acquire_command_slot, send_html_or_file};
pub(super) use formatting::as_html_block;
pub(super) use keyboards::{edit_render, send_render};
