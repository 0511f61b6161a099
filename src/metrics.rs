use crate::gateway::{DatabaseGateway, GatewayError};

/// The per-database metrics the bot can inspect, in the fixed order the
/// metric menu presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    ActiveSessions,
    SessionsWithLwLock,
    LongestTransactionDuration,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::ActiveSessions,
        MetricKind::SessionsWithLwLock,
        MetricKind::LongestTransactionDuration,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MetricKind::ActiveSessions => "Active Sessions",
            MetricKind::SessionsWithLwLock => "Sessions with LWLock",
            MetricKind::LongestTransactionDuration => "Longest Transaction Duration",
        }
    }

    pub fn callback_data(self) -> &'static str {
        match self {
            MetricKind::ActiveSessions => "active_sessions",
            MetricKind::SessionsWithLwLock => "sessions_with_lwlock",
            MetricKind::LongestTransactionDuration => "longest_transaction_duration",
        }
    }

    pub fn from_callback_data(data: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.callback_data() == data)
    }

    /// Generic operator-facing failure text for this metric. The underlying
    /// gateway error is logged, never shown in chat.
    pub fn unavailable_text(self) -> &'static str {
        match self {
            MetricKind::ActiveSessions | MetricKind::SessionsWithLwLock => {
                "An error occurred while retrieving session information."
            }
            MetricKind::LongestTransactionDuration => {
                "An error occurred while retrieving transaction information."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    ActiveSessionCount(usize),
    LwLockCount(i64),
    LongestTransaction(Option<String>),
}

pub async fn evaluate<G: DatabaseGateway>(
    gateway: &G,
    kind: MetricKind,
    database: &str,
) -> Result<MetricValue, GatewayError> {
    match kind {
        MetricKind::ActiveSessions => {
            let sessions = gateway.active_sessions(database).await?;
            Ok(MetricValue::ActiveSessionCount(sessions.len()))
        }
        MetricKind::SessionsWithLwLock => {
            let count = gateway.sessions_with_lwlock(database).await?;
            Ok(MetricValue::LwLockCount(count))
        }
        MetricKind::LongestTransactionDuration => {
            let duration = gateway.longest_transaction(database).await?;
            Ok(MetricValue::LongestTransaction(duration))
        }
    }
}

pub fn format_metric_result(database: &str, value: &MetricValue) -> String {
    match value {
        MetricValue::ActiveSessionCount(count) => {
            format!("Active sessions in {}: {}", database, count)
        }
        MetricValue::LwLockCount(count) => {
            format!("Sessions with LWLock in {}: {}", database, count)
        }
        MetricValue::LongestTransaction(Some(duration)) => {
            format!("Longest transaction duration in {}: {}", database, duration)
        }
        MetricValue::LongestTransaction(None) => {
            format!("No active transactions found in {}.", database)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::mock::MockGateway;

    #[test]
    fn menu_order_is_fixed() {
        let labels: Vec<&str> = MetricKind::ALL.iter().map(|kind| kind.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Active Sessions",
                "Sessions with LWLock",
                "Longest Transaction Duration"
            ]
        );
    }

    #[test]
    fn callback_data_resolves_back_to_the_kind() {
        assert_eq!(
            MetricKind::from_callback_data("sessions_with_lwlock"),
            Some(MetricKind::SessionsWithLwLock)
        );
        assert_eq!(MetricKind::from_callback_data("select_db:app"), None);
    }

    #[tokio::test]
    async fn active_session_count_comes_from_the_row_set() {
        let gateway = MockGateway::with_sessions(7);
        let value = evaluate(&gateway, MetricKind::ActiveSessions, "app")
            .await
            .expect("evaluation should succeed");

        assert_eq!(value, MetricValue::ActiveSessionCount(7));
        assert_eq!(format_metric_result("app", &value), "Active sessions in app: 7");
    }

    #[tokio::test]
    async fn missing_transaction_is_a_valid_result() {
        let gateway = MockGateway::new();
        let value = evaluate(&gateway, MetricKind::LongestTransactionDuration, "app")
            .await
            .expect("evaluation should succeed");

        assert_eq!(value, MetricValue::LongestTransaction(None));
        assert_eq!(
            format_metric_result("app", &value),
            "No active transactions found in app."
        );
    }

    #[tokio::test]
    async fn gateway_failure_surfaces_as_a_typed_error() {
        let mut gateway = MockGateway::new();
        gateway.lwlock_count = Err(crate::gateway::GatewayError::Query(
            "relation does not exist".to_string(),
        ));

        let result = evaluate(&gateway, MetricKind::SessionsWithLwLock, "app").await;
        assert!(result.is_err());
        assert_eq!(
            MetricKind::SessionsWithLwLock.unavailable_text(),
            "An error occurred while retrieving session information."
        );
    }
}
