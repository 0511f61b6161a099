use serde::Deserialize;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bot_token: String,
    pub owner_id: u64,
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval: u64,
    #[serde(default)]
    pub alerts: Alerts,
    pub postgres: PostgresConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Alert thresholds, compared strictly: counts and percentages must exceed
/// their threshold, free disk space must fall below its minimum.
#[derive(Debug, Clone, Deserialize)]
pub struct Alerts {
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    #[serde(default = "default_alert_cpu")]
    pub cpu: f32,
    #[serde(default = "default_alert_ram")]
    pub ram: f32,
    #[serde(default = "default_min_disk_free_gb")]
    pub min_disk_free_gb: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresConfig {
    pub host: String,
    #[serde(default = "default_postgres_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_postgres_dbname")]
    pub dbname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: String,
    #[serde(default = "default_log_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_log_keep_files")]
    pub keep_files: u16,
}
