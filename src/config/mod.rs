mod defaults;
mod schema;
mod validate;

use std::path::Path;

pub use schema::{Alerts, Config, LogConfig, PostgresConfig};
pub use validate::ConfigError;

impl Config {
    /// Reads, parses, and validates the TOML config at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let read_error = |source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        };
        let parse_error = |source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        };

        let config: Self =
            toml::from_str(&std::fs::read_to_string(path).map_err(read_error)?)
                .map_err(parse_error)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{Config, ConfigError};

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn load_reads_parses_and_validates() {
        let file = config_file(
            r#"
bot_token = "token"
owner_id = 42
monitor_interval = 30

[postgres]
host = "db.internal"
user = "monitor"
"#,
        );

        let config = Config::load(file.path()).expect("config should load");
        assert_eq!(config.owner_id, 42);
        assert_eq!(config.monitor_interval, 30);
        assert_eq!(config.postgres.host, "db.internal");
        assert_eq!(config.alerts.max_sessions, 100);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let error = Config::load("no-such-config.toml").expect_err("file is absent");
        assert!(matches!(error, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = config_file("bot_token = [unclosed");
        let error = Config::load(file.path()).expect_err("toml is malformed");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_fail_validation_on_load() {
        let file = config_file(
            r#"
bot_token = "token"
owner_id = 1

[alerts]
cpu = 150.0

[postgres]
host = "localhost"
user = "monitor"
"#,
        );

        let error = Config::load(file.path()).expect_err("threshold is out of range");
        assert!(matches!(error, ConfigError::Validation(_)));
    }
}
