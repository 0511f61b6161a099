use teloxide::prelude::*;

use crate::app_context::AppContext;
use crate::gateway::DatabaseGateway;
use crate::workflow::SELECT_DATABASE_FIRST;

use super::super::helpers::{acquire_command_slot, send_html_or_file};

pub(crate) const INVALID_PID: &str =
    "Invalid PID. Please provide a valid PID to kill the session.";
const SESSION_INFO_ERROR: &str = "An error occurred while retrieving session information.";
const TERMINATE_ERROR: &str = "An error occurred while terminating the session.";
const CHECKPOINT_ERROR: &str = "An error occurred while running the checkpoint restart.";
const LONG_REPLY_THRESHOLD: usize = 3900;

pub(crate) async fn handle_active_sessions(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let selected = selected_database(app_context, msg.chat.id).await;
    if selected.is_none() {
        bot.send_message(msg.chat.id, SELECT_DATABASE_FIRST).await?;
        return Ok(());
    }

    let Some(_permit) = acquire_command_slot(&app_context.command_slots, msg, bot).await? else {
        return Ok(());
    };
    let report =
        active_sessions_report(app_context.gateway.as_ref(), selected.as_deref()).await;
    if report.len() > LONG_REPLY_THRESHOLD {
        send_html_or_file(bot, msg.chat.id, "Active Sessions", &report).await?;
    } else {
        bot.send_message(msg.chat.id, report).await?;
    }
    Ok(())
}

pub(crate) async fn handle_kill(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
    input: &str,
) -> ResponseResult<()> {
    let selected = selected_database(app_context, msg.chat.id).await;

    let Some(_permit) = acquire_command_slot(&app_context.command_slots, msg, bot).await? else {
        return Ok(());
    };
    let report = kill_report(app_context.gateway.as_ref(), selected.as_deref(), input).await;
    bot.send_message(msg.chat.id, report).await?;
    Ok(())
}

pub(crate) async fn handle_checkpoint_restart(
    bot: &Bot,
    msg: &Message,
    app_context: &AppContext,
) -> ResponseResult<()> {
    let selected = selected_database(app_context, msg.chat.id).await;
    let Some(database) = selected else {
        bot.send_message(msg.chat.id, SELECT_DATABASE_FIRST).await?;
        return Ok(());
    };

    let Some(_permit) = acquire_command_slot(&app_context.command_slots, msg, bot).await? else {
        return Ok(());
    };
    let report = checkpoint_report(app_context.gateway.as_ref(), &database).await;
    bot.send_message(msg.chat.id, report).await?;
    Ok(())
}

async fn selected_database(app_context: &AppContext, chat_id: ChatId) -> Option<String> {
    let sessions = app_context.sessions.lock().await;
    sessions.selected_database(chat_id)
}

pub(crate) fn parse_pid(input: &str) -> Option<i32> {
    input.trim().parse::<i32>().ok().filter(|pid| *pid > 0)
}

pub(crate) async fn active_sessions_report<G: DatabaseGateway>(
    gateway: &G,
    selected: Option<&str>,
) -> String {
    let Some(database) = selected else {
        return SELECT_DATABASE_FIRST.to_string();
    };

    match gateway.active_sessions(database).await {
        Ok(sessions) if sessions.is_empty() => format!(
            "No active sessions in {}.\n\nIf you want to kill specific session use /kill command.",
            database
        ),
        Ok(sessions) => {
            let listing = sessions
                .iter()
                .map(|session| {
                    format!(
                        "PID: {}, User: {}, Application: {}, State: {}\n",
                        session.pid, session.user, session.application_name, session.state
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!("Active Sessions in {}:\n{}", database, listing)
        }
        Err(error) => {
            log::error!("active session listing failed for {}: {}", database, error);
            SESSION_INFO_ERROR.to_string()
        }
    }
}

/// Guards run in order before the gateway is touched: no selection, then a
/// malformed PID, each short-circuits with its guidance text.
pub(crate) async fn kill_report<G: DatabaseGateway>(
    gateway: &G,
    selected: Option<&str>,
    input: &str,
) -> String {
    if selected.is_none() {
        return SELECT_DATABASE_FIRST.to_string();
    }
    let Some(pid) = parse_pid(input) else {
        return INVALID_PID.to_string();
    };

    match gateway.terminate_backend(pid).await {
        Ok(true) => format!("Session with PID {} has been terminated.", pid),
        Ok(false) => format!("No session with PID {} was found.", pid),
        Err(error) => {
            log::error!("terminate_backend failed for pid {}: {}", pid, error);
            TERMINATE_ERROR.to_string()
        }
    }
}

pub(crate) async fn checkpoint_report<G: DatabaseGateway>(gateway: &G, database: &str) -> String {
    match gateway.checkpoint_and_terminate(database).await {
        Ok(terminated) => {
            log::info!(
                "checkpoint restart on {}: {} backends terminated",
                database,
                terminated
            );
            "Checkpoint executed, and the database has been restarted.".to_string()
        }
        Err(error) => {
            log::error!("checkpoint restart failed for {}: {}", database, error);
            CHECKPOINT_ERROR.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;

    #[test]
    fn pid_must_be_a_positive_integer() {
        assert_eq!(parse_pid("4242"), Some(4242));
        assert_eq!(parse_pid(" 17 "), Some(17));
        assert_eq!(parse_pid("abc"), None);
        assert_eq!(parse_pid(""), None);
        assert_eq!(parse_pid("-5"), None);
    }

    #[tokio::test]
    async fn listing_without_a_selection_makes_no_gateway_call() {
        let gateway = MockGateway::with_sessions(3);
        let report = active_sessions_report(&gateway, None).await;

        assert_eq!(report, SELECT_DATABASE_FIRST);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn listing_renders_one_line_per_session() {
        let gateway = MockGateway::with_sessions(2);
        let report = active_sessions_report(&gateway, Some("app")).await;

        assert!(report.starts_with("Active Sessions in app:"));
        assert!(report.contains("PID: 1, User: app_user, Application: app, State: active"));
        assert!(report.contains("PID: 2,"));
    }

    #[tokio::test]
    async fn empty_listing_suggests_nothing_to_kill() {
        let gateway = MockGateway::new();
        let report = active_sessions_report(&gateway, Some("app")).await;
        assert!(report.starts_with("No active sessions in app."));
    }

    #[tokio::test]
    async fn kill_reports_the_terminated_pid() {
        let gateway = MockGateway::new();
        let report = kill_report(&gateway, Some("app"), "4242").await;
        assert_eq!(report, "Session with PID 4242 has been terminated.");
    }

    #[tokio::test]
    async fn kill_without_a_selection_makes_no_gateway_call() {
        let gateway = MockGateway::new();
        let report = kill_report(&gateway, None, "4242").await;

        assert_eq!(report, SELECT_DATABASE_FIRST);
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn kill_rejects_a_bad_pid_before_touching_the_gateway() {
        let gateway = MockGateway::new();
        let report = kill_report(&gateway, Some("app"), "not-a-pid").await;

        assert_eq!(report, INVALID_PID);
        assert_eq!(gateway.call_count(), 0);
    }
}
