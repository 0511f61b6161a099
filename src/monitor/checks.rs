//! Threshold rules. Each rule is evaluated independently every tick and
//! carries no cross-tick memory: a condition that keeps holding keeps
//! alerting every interval until resolved.

pub(crate) const MONITOR_NOT_SELECTED: &str =
    "Can't monitor active sessions: database not selected.\n\nUse /database command to select database.";

/// Strict comparison: a count exactly at the threshold does not alert.
pub(crate) fn session_alert(count: usize, max_sessions: u64) -> Option<String> {
    if count as u64 > max_sessions {
        Some(format!(
            "Too many active sessions in the database! - {}.\n\nYou can use /kill command to kill selected active session",
            count
        ))
    } else {
        None
    }
}

pub(crate) fn cpu_alert(usage: f32, threshold: f32) -> Option<String> {
    if usage > threshold {
        Some(format!("Warning, high CPU usage! - {:.1}%", usage))
    } else {
        None
    }
}

pub(crate) fn ram_alert(percent_used: f32, threshold: f32) -> Option<String> {
    if percent_used > threshold {
        Some(format!("Warning, high RAM usage! - {:.1}%", percent_used))
    } else {
        None
    }
}

pub(crate) fn disk_alert(free_gb: f64, min_free_gb: f64) -> Option<String> {
    if free_gb < min_free_gb {
        Some(format!("Warning, low disk space! - {:.2}Gb", free_gb))
    } else {
        None
    }
}
