use crate::config::Alerts;
use crate::gateway::DatabaseGateway;
use crate::sampler::ResourceSampler;

use super::checks;

/// The session-count check for one tick. `selected_database` is the snapshot
/// taken when the tick started; with no database selected the check emits the
/// guidance notice instead of querying. A gateway failure is logged and the
/// tick is treated as no-breach so the other checks are unaffected.
pub async fn session_check<G: DatabaseGateway>(
    gateway: &G,
    selected_database: Option<&str>,
    max_sessions: u64,
) -> Option<String> {
    let database = match selected_database {
        Some(database) => database,
        None => return Some(checks::MONITOR_NOT_SELECTED.to_string()),
    };

    match gateway.active_sessions(database).await {
        Ok(sessions) => checks::session_alert(sessions.len(), max_sessions),
        Err(error) => {
            log::warn!(
                "session check skipped: database={} error={}",
                database,
                error
            );
            None
        }
    }
}

/// The CPU, RAM, and disk checks for one tick. Each samples independently;
/// a sampler failure is logged and only silences that one check.
pub fn resource_checks<S: ResourceSampler>(sampler: &mut S, alerts: &Alerts) -> Vec<String> {
    let mut notifications = Vec::new();

    match sampler.cpu_percent() {
        Ok(usage) => notifications.extend(checks::cpu_alert(usage, alerts.cpu)),
        Err(error) => log::warn!("cpu check skipped: {}", error),
    }

    match sampler.memory_info() {
        Ok(memory) => notifications.extend(checks::ram_alert(memory.percent_used, alerts.ram)),
        Err(error) => log::warn!("ram check skipped: {}", error),
    }

    match sampler.disk_info() {
        Ok(disk) => notifications.extend(checks::disk_alert(disk.free_gb, alerts.min_disk_free_gb)),
        Err(error) => log::warn!("disk check skipped: {}", error),
    }

    notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use crate::gateway::mock::MockGateway;
    use crate::sampler::SampleError;
    use crate::sampler::mock::MockSampler;

    fn test_alerts() -> Alerts {
        Alerts {
            max_sessions: 100,
            cpu: 90.0,
            ram: 95.0,
            min_disk_free_gb: 1.0,
        }
    }

    #[tokio::test]
    async fn unselected_database_yields_guidance_without_a_gateway_call() {
        let gateway = MockGateway::with_sessions(500);

        let notice = session_check(&gateway, None, 100).await;
        assert_eq!(notice.as_deref(), Some(checks::MONITOR_NOT_SELECTED));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn session_count_at_threshold_does_not_alert() {
        let gateway = MockGateway::with_sessions(100);
        assert!(session_check(&gateway, Some("app"), 100).await.is_none());

        let gateway = MockGateway::with_sessions(101);
        let alert = session_check(&gateway, Some("app"), 100)
            .await
            .expect("over threshold");
        assert!(alert.starts_with("Too many active sessions in the database! - 101."));
    }

    #[tokio::test]
    async fn failed_session_check_does_not_suppress_resource_checks() {
        let mut gateway = MockGateway::new();
        gateway.sessions = Err(GatewayError::Query("pg_stat_activity vanished".to_string()));

        // Tick k: the session check fails, the resource checks still run.
        assert!(session_check(&gateway, Some("app"), 100).await.is_none());
        let mut sampler = MockSampler::steady(93.0, 97.0, 0.5);
        let notifications = resource_checks(&mut sampler, &test_alerts());
        assert_eq!(notifications.len(), 3);

        // Tick k+1: nothing stayed cancelled.
        assert!(session_check(&gateway, Some("app"), 100).await.is_none());
        let notifications = resource_checks(&mut sampler, &test_alerts());
        assert_eq!(notifications.len(), 3);
    }

    #[test]
    fn alert_fires_only_while_the_condition_holds() {
        let alerts = test_alerts();

        let mut sampler = MockSampler::steady(93.0, 50.0, 10.0);
        let breaching = resource_checks(&mut sampler, &alerts);
        assert_eq!(breaching, vec!["Warning, high CPU usage! - 93.0%".to_string()]);

        let mut sampler = MockSampler::steady(85.0, 50.0, 10.0);
        assert!(resource_checks(&mut sampler, &alerts).is_empty());
    }

    #[test]
    fn one_failed_sampler_source_silences_only_itself() {
        let mut sampler = MockSampler::steady(93.0, 97.0, 10.0);
        sampler.memory = Err(SampleError("sampler unavailable".to_string()));

        let notifications = resource_checks(&mut sampler, &test_alerts());
        assert_eq!(notifications, vec!["Warning, high CPU usage! - 93.0%".to_string()]);
    }
}
