use std::collections::HashMap;

use teloxide::types::ChatId;
use tokio::task::JoinHandle;

/// Running monitor tasks, one per chat that issued /start. Holding the join
/// handle is what makes /stop possible.
#[derive(Debug, Default)]
pub struct MonitorRegistry {
    tasks: HashMap<ChatId, JoinHandle<()>>,
}

impl MonitorRegistry {
    /// Registers a monitor task for the chat, replacing (and cancelling) any
    /// previous registration so repeated /start never stacks duplicate loops.
    pub fn register(&mut self, chat_id: ChatId, handle: JoinHandle<()>) {
        if let Some(previous) = self.tasks.insert(chat_id, handle) {
            previous.abort();
        }
    }

    /// Cancels the chat's monitor task. Returns false when none was running.
    pub fn stop(&mut self, chat_id: ChatId) -> bool {
        match self.tasks.remove(&chat_id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self, chat_id: ChatId) -> bool {
        self.tasks
            .get(&chat_id)
            .is_some_and(|handle| !handle.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stop_cancels_a_registered_task() {
        let mut registry = MonitorRegistry::default();
        let handle = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });

        registry.register(ChatId(7), handle);
        assert!(registry.is_running(ChatId(7)));
        assert!(registry.stop(ChatId(7)));
        assert!(!registry.is_running(ChatId(7)));
        assert!(!registry.stop(ChatId(7)));
    }

    #[tokio::test]
    async fn re_registering_replaces_the_previous_task() {
        let mut registry = MonitorRegistry::default();
        let first = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });
        let second = tokio::spawn(async {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        });

        registry.register(ChatId(7), first);
        registry.register(ChatId(7), second);

        // Still exactly one registration, and it is stoppable.
        assert!(registry.stop(ChatId(7)));
        assert!(!registry.stop(ChatId(7)));
    }
}
