use teloxide::types::{ChatId, UserId};
use thiserror::Error;

use super::schema::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bot_token must not be empty".to_string(),
            ));
        }
        if self.owner_id == 0 {
            return Err(ConfigError::Validation(
                "owner_id must be a positive integer".to_string(),
            ));
        }
        if self.monitor_interval == 0 {
            return Err(ConfigError::Validation(
                "monitor_interval must be greater than 0".to_string(),
            ));
        }
        if self.alerts.max_sessions == 0 {
            return Err(ConfigError::Validation(
                "alerts.max_sessions must be greater than 0".to_string(),
            ));
        }
        validate_percentage("alerts.cpu", self.alerts.cpu)?;
        validate_percentage("alerts.ram", self.alerts.ram)?;
        if !self.alerts.min_disk_free_gb.is_finite() || self.alerts.min_disk_free_gb < 0.0 {
            return Err(ConfigError::Validation(
                "alerts.min_disk_free_gb must be a non-negative number".to_string(),
            ));
        }
        if self.postgres.host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "postgres.host must not be empty".to_string(),
            ));
        }
        if self.postgres.user.trim().is_empty() {
            return Err(ConfigError::Validation(
                "postgres.user must not be empty".to_string(),
            ));
        }
        if self.postgres.dbname.trim().is_empty() {
            return Err(ConfigError::Validation(
                "postgres.dbname must not be empty".to_string(),
            ));
        }
        if self.log.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "log.path must not be empty".to_string(),
            ));
        }
        if self.log.max_file_size_bytes == 0 {
            return Err(ConfigError::Validation(
                "log.max_file_size_bytes must be greater than 0".to_string(),
            ));
        }
        if self.log.keep_files == 0 {
            return Err(ConfigError::Validation(
                "log.keep_files must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn owner_chat_id(&self) -> Result<ChatId, ConfigError> {
        let chat_id = i64::try_from(self.owner_id).map_err(|_| {
            ConfigError::Validation("owner_id is too large to fit a Telegram chat id".to_string())
        })?;
        Ok(ChatId(chat_id))
    }

    pub fn owner_user_id(&self) -> Result<UserId, ConfigError> {
        if self.owner_id == 0 {
            return Err(ConfigError::Validation(
                "owner_id must be a positive integer".to_string(),
            ));
        }
        Ok(UserId(self.owner_id))
    }
}

fn validate_percentage(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::schema::Config;

    const MINIMAL: &str = r#"
bot_token = "token"
owner_id = 1

[postgres]
host = "localhost"
user = "monitor"
"#;

    fn parse(raw: &str) -> Config {
        toml::from_str(raw).expect("toml should parse")
    }

    #[test]
    fn minimal_config_gets_the_documented_defaults() {
        let config = parse(MINIMAL);
        config.validate().expect("minimal config should validate");

        assert_eq!(config.monitor_interval, 15);
        assert_eq!(config.alerts.max_sessions, 100);
        assert_eq!(config.alerts.cpu, 90.0);
        assert_eq!(config.alerts.ram, 95.0);
        assert_eq!(config.alerts.min_disk_free_gb, 1.0);
        assert_eq!(config.postgres.port, 5432);
        assert_eq!(config.postgres.dbname, "postgres");
        assert_eq!(config.log.keep_files, 5);
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let mut config = parse(MINIMAL);
        config.alerts.cpu = 120.0;
        assert!(config.validate().is_err());

        let mut config = parse(MINIMAL);
        config.alerts.max_sessions = 0;
        assert!(config.validate().is_err());

        let mut config = parse(MINIMAL);
        config.alerts.min_disk_free_gb = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_connection_fields_are_rejected() {
        let mut config = parse(MINIMAL);
        config.postgres.host = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = parse(MINIMAL);
        config.bot_token = String::new();
        assert!(config.validate().is_err());
    }
}
