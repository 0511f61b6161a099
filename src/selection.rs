use std::collections::HashMap;

use teloxide::types::ChatId;

use crate::metrics::MetricKind;

/// Where the selection dialog currently stands for one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    NoDatabase,
    DatabaseSelected,
    MetricMenuShown,
    MetricResultShown,
}

/// The single mutable resource shared between the interactive path and the
/// scheduled checks. `selected_metric` is only meaningful while
/// `selected_database` is set; `clear_database` enforces that by dropping the
/// metric as well.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_database: Option<String>,
    selected_metric: Option<MetricKind>,
}

impl SelectionState {
    pub fn select_database(&mut self, name: impl Into<String>) {
        self.selected_database = Some(name.into());
        self.selected_metric = None;
    }

    pub fn clear_database(&mut self) {
        self.selected_database = None;
        self.selected_metric = None;
    }

    pub fn select_metric(&mut self, kind: MetricKind) {
        self.selected_metric = Some(kind);
    }

    pub fn clear_metric(&mut self) {
        self.selected_metric = None;
    }

    pub fn read(&self) -> (Option<&str>, Option<MetricKind>) {
        (self.selected_database.as_deref(), self.selected_metric)
    }

    pub fn database(&self) -> Option<&str> {
        self.selected_database.as_deref()
    }
}

/// Per-chat dialog state. `known_databases` holds the last successful
/// listing; a select_db callback is only honored for a name in that list, so
/// the UI can never select an identifier the server never reported.
#[derive(Debug, Clone, Default)]
pub struct OperatorSession {
    pub selection: SelectionState,
    pub ui_state: UiState,
    pub known_databases: Vec<String>,
}

/// All operator sessions, keyed by chat. One operator pressing buttons never
/// touches another chat's selection.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<ChatId, OperatorSession>,
}

impl SessionRegistry {
    pub fn session_mut(&mut self, chat_id: ChatId) -> &mut OperatorSession {
        self.sessions.entry(chat_id).or_default()
    }

    /// Snapshot of the selected database for one chat. Callers must treat
    /// this as taken-once data: after any await, the live session may have
    /// moved on.
    pub fn selected_database(&self, chat_id: ChatId) -> Option<String> {
        self.sessions
            .get(&chat_id)
            .and_then(|session| session.selection.database().map(str::to_string))
    }
}
