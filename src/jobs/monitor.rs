use teloxide::prelude::*;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::monitor::{resource_checks, session_check};

/// Spawns the periodic alert checks for one chat. The first round runs
/// immediately; after that the loop wakes every `monitor_interval` seconds.
/// The caller owns the returned handle (via the registry) so the task can be
/// cancelled.
pub fn start_monitor_job(bot: Bot, app_context: AppContext, chat_id: ChatId) -> JoinHandle<()> {
    tokio::spawn(async move {
        let interval = Duration::from_secs(app_context.config.monitor_interval);
        let alerts = app_context.config.alerts.clone();

        loop {
            // Snapshot the selection once per tick. The operator may change
            // it while the query below is in flight; this tick keeps acting
            // on the snapshot and the next tick sees the new value.
            let selected_database = {
                let sessions = app_context.sessions.lock().await;
                sessions.selected_database(chat_id)
            };

            let mut notifications = Vec::new();
            notifications.extend(
                session_check(
                    app_context.gateway.as_ref(),
                    selected_database.as_deref(),
                    alerts.max_sessions,
                )
                .await,
            );

            {
                // Sampling is synchronous; the lock is never held across an
                // await, so interactive /cpu-style commands cannot be stalled
                // by a slow tick.
                let mut sampler = app_context.sampler.lock().await;
                notifications.extend(resource_checks(&mut *sampler, &alerts));
            }

            for notification in notifications {
                if let Err(error) = bot.send_message(chat_id, notification).await {
                    log::error!("failed to send alert to {}: {}", chat_id.0, error);
                }
            }

            sleep(interval).await;
        }
    })
}
