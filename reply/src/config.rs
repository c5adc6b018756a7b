use std::time::Duration;

use config::{Environment, File, FileFormat};

use crate::{error::ConfigError, http::EncodeOptions};

pub const CONFIG_FILE: &str = "reply.toml";
pub const ENV_PREFIX: &str = "REPLY";

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub bind: String,
    /// Keep connections open between responses.
    pub keep_alive: bool,
    pub timeout_secs: u64,
    pub max_connections: usize,
    pub max_head_len: usize,
    pub encode: EncodeOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            keep_alive: true,
            timeout_secs: 15,
            max_connections: 1_000,
            max_head_len: crate::http::codec::MAX_HEAD_LEN,
            encode: EncodeOptions::default(),
        }
    }
}

impl Config {
    /// Reads `reply.toml` if present, then `REPLY_*` environment variables
    /// (`REPLY_ENCODE__REASON_PHRASE=canonical` for nested keys).
    pub fn load() -> Result<Self, ConfigError> {
        let config = ::config::Config::builder()
            .add_source(File::new(CONFIG_FILE, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Config>()?;

        config.check()
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let config = ::config::Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?;

        config.check()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn check(self) -> Result<Self, ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::NoConnections);
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ReasonPhrase;

    #[test]
    fn test_empty_source_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert!(config.keep_alive);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.encode, EncodeOptions::default());
    }

    #[test]
    fn test_nested_encode_options() {
        let config = Config::from_toml(
            r#"
            bind = "127.0.0.1:9999"
            keep_alive = false

            [encode]
            reason_phrase = "canonical"
            reject_line_breaks = true
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:9999");
        assert!(!config.keep_alive);
        assert_eq!(config.encode.reason_phrase, ReasonPhrase::Canonical);
        assert!(config.encode.reject_line_breaks);
        assert!(!config.encode.keep_alive_header);
    }

    #[test]
    fn test_zero_connections_is_rejected() {
        let err = Config::from_toml("max_connections = 0").unwrap_err();
        assert!(matches!(err, ConfigError::NoConnections));
    }
}
