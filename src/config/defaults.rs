use super::schema::{Alerts, LogConfig};

pub(super) fn default_monitor_interval() -> u64 {
    15
}

pub(super) fn default_max_sessions() -> u64 {
    100
}

pub(super) fn default_alert_cpu() -> f32 {
    90.0
}

pub(super) fn default_alert_ram() -> f32 {
    95.0
}

pub(super) fn default_min_disk_free_gb() -> f64 {
    1.0
}

pub(super) fn default_postgres_port() -> u16 {
    5432
}

pub(super) fn default_postgres_dbname() -> String {
    "postgres".to_string()
}

pub(super) fn default_log_path() -> String {
    "logs/pg_monitor_bot.log".to_string()
}

pub(super) fn default_log_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

pub(super) fn default_log_keep_files() -> u16 {
    5
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            cpu: default_alert_cpu(),
            ram: default_alert_ram(),
            min_disk_free_gb: default_min_disk_free_gb(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            max_file_size_bytes: default_log_max_file_size_bytes(),
            keep_files: default_log_keep_files(),
        }
    }
}
