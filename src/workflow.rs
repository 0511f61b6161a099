use crate::metrics::MetricKind;
use crate::selection::{OperatorSession, UiState};

pub const SELECT_DB_PREFIX: &str = "select_db:";
pub const BACK_TO_METRICS: &str = "back";
pub const BACK_TO_DATABASES: &str = "back_db";

pub const SELECT_DATABASE_FIRST: &str =
    "Please select a database first.\n\nUse /database command to select database.";
pub const NO_DATABASES_FOUND: &str = "No databases found.";
pub const UNKNOWN_DATABASE: &str =
    "Unknown database. Use /database command to refresh the list.";

/// What to attach to a rendered message. The transport layer turns this into
/// an inline keyboard; keeping it as data keeps every transition testable
/// without Telegram.
#[derive(Debug, Clone, PartialEq)]
pub enum Keyboard {
    None,
    Databases(Vec<String>),
    Metrics,
    BackToMetrics,
    BackToDatabases,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Render {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Keyboard::None,
        }
    }
}

/// A fresh `/database` listing. Records the names the operator may select
/// from; an empty listing leaves the dialog where it was.
pub fn database_listing(session: &mut OperatorSession, names: Vec<String>) -> Render {
    listing(session, names, "Select a database:")
}

/// Re-listing after `back_db` uses the shorter prompt.
pub fn relist_databases(session: &mut OperatorSession, names: Vec<String>) -> Render {
    listing(session, names, "Select database:")
}

fn listing(session: &mut OperatorSession, names: Vec<String>, prompt: &str) -> Render {
    if names.is_empty() {
        return Render::text_only(NO_DATABASES_FOUND);
    }

    session.known_databases = names.clone();
    Render {
        text: prompt.to_string(),
        keyboard: Keyboard::Databases(names),
    }
}

/// `select_db:<name>` pressed. Only names from the last listing are honored.
pub fn choose_database(session: &mut OperatorSession, name: &str) -> Render {
    if !session.known_databases.iter().any(|known| known == name) {
        return Render::text_only(UNKNOWN_DATABASE);
    }

    session.selection.select_database(name);
    session.ui_state = UiState::DatabaseSelected;
    Render {
        text: format!("Database {} selected!", name),
        keyboard: Keyboard::BackToDatabases,
    }
}

/// `/metrics` or returning from a metric result. Shown regardless of whether
/// a database is selected; choosing a metric is what requires one.
pub fn open_metric_menu(session: &mut OperatorSession) -> Render {
    session.ui_state = UiState::MetricMenuShown;
    metric_menu_render()
}

fn metric_menu_render() -> Render {
    Render {
        text: "Select a metric:".to_string(),
        keyboard: Keyboard::Metrics,
    }
}

/// A metric was evaluated for the selected database. Only called with the
/// result text in hand, so replaying the render with unchanged state and data
/// is byte-identical.
pub fn metric_result(session: &mut OperatorSession, kind: MetricKind, text: String) -> Render {
    debug_assert!(session.selection.database().is_some());
    session.selection.select_metric(kind);
    session.ui_state = UiState::MetricResultShown;
    Render {
        text,
        keyboard: Keyboard::BackToMetrics,
    }
}

/// `back` from a metric result. A no-op unless a metric result is actually
/// shown, so a stale button press cannot rewind an unrelated view.
pub fn back_from_result(session: &mut OperatorSession) -> Option<Render> {
    if session.ui_state != UiState::MetricResultShown {
        return None;
    }

    session.selection.clear_metric();
    session.ui_state = UiState::MetricMenuShown;
    Some(metric_menu_render())
}

/// `back_db` from the database-selected view. Clears the whole selection;
/// the caller re-lists databases and renders via `database_listing`. Returns
/// false when nothing was selected, which the caller treats as a no-op.
pub fn back_to_database_list(session: &mut OperatorSession) -> bool {
    if session.selection.database().is_none() {
        return false;
    }

    session.selection.clear_database();
    session.ui_state = UiState::NoDatabase;
    true
}
