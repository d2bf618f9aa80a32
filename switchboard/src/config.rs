use serde::Deserialize;
use std::fs::File;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("port cannot be 0")]
    InvalidPort,

    #[error("directory URL cannot be empty")]
    EmptyDirectoryUrl,

    #[error("dispatcher max_in_flight cannot be 0")]
    ZeroConcurrency,

    #[error("directory cache_ttl_secs cannot be 0")]
    ZeroCacheTtl,
}

#[derive(Deserialize, Debug)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct LoggingConfig {
    pub sentry_dsn: String,
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Listener {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
pub struct DirectoryConfig {
    /// Base URL of the upstream directory resolution API.
    pub url: String,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

/// Process-wide outbound limits; not per account, not per resource.
#[derive(Deserialize, Debug)]
pub struct DispatcherConfig {
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_max_in_flight() -> usize {
    8
}

fn default_min_interval_ms() -> u64 {
    50
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        DispatcherConfig {
            max_in_flight: default_max_in_flight(),
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Config {
    /// Listener for the ops API (resolve, invalidate, probe).
    pub listener: Listener,
    /// Listener for health and readiness probes.
    pub admin_listener: Listener,
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub dispatcher: DispatcherConfig,
    pub metrics: Option<MetricsConfig>,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.listener.validate()?;
        self.admin_listener.validate()?;

        if self.directory.url.is_empty() {
            return Err(ValidationError::EmptyDirectoryUrl);
        }
        if self.directory.cache_ttl_secs == 0 {
            return Err(ValidationError::ZeroCacheTtl);
        }
        if self.dispatcher.max_in_flight == 0 {
            return Err(ValidationError::ZeroConcurrency);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_YAML: &str = r#"
listener:
    host: "0.0.0.0"
    port: 3000
admin_listener:
    host: "127.0.0.1"
    port: 3001
directory:
    url: "https://directory.engagecloud.net"
    cache_ttl_secs: 1800
dispatcher:
    max_in_flight: 16
    min_interval_ms: 25
metrics:
    statsd_host: "127.0.0.1"
    statsd_port: 8125
logging:
    sentry_dsn: "https://key@sentry.example.com/1"
"#;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{s}").expect("write yaml");

        tmp
    }

    #[test]
    fn test_parse_full_config() {
        let tmp = write_tmp_file(FULL_YAML);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert!(config.validate().is_ok());
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.directory.cache_ttl_secs, 1800);
        assert_eq!(config.dispatcher.max_in_flight, 16);
        assert_eq!(config.metrics.unwrap().statsd_port, 8125);
    }

    #[test]
    fn test_defaults_applied() {
        let yaml = r#"
listener: {host: "0.0.0.0", port: 3000}
admin_listener: {host: "127.0.0.1", port: 3001}
directory: {url: "https://directory.engagecloud.net"}
"#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.directory.cache_ttl_secs, 3600);
        assert_eq!(config.dispatcher.max_in_flight, 8);
        assert_eq!(config.dispatcher.min_interval_ms, 50);
        assert!(config.metrics.is_none());
        assert!(config.logging.is_none());
    }

    #[test]
    fn test_validation_errors() {
        let zero_port = r#"
listener: {host: "0.0.0.0", port: 0}
admin_listener: {host: "127.0.0.1", port: 3001}
directory: {url: "https://directory.engagecloud.net"}
"#;
        let tmp = write_tmp_file(zero_port);
        let config = Config::from_file(tmp.path()).unwrap();
        assert_eq!(config.validate(), Err(ValidationError::InvalidPort));

        let empty_url = r#"
listener: {host: "0.0.0.0", port: 3000}
admin_listener: {host: "127.0.0.1", port: 3001}
directory: {url: ""}
"#;
        let tmp = write_tmp_file(empty_url);
        let config = Config::from_file(tmp.path()).unwrap();
        assert_eq!(config.validate(), Err(ValidationError::EmptyDirectoryUrl));

        let zero_concurrency = r#"
listener: {host: "0.0.0.0", port: 3000}
admin_listener: {host: "127.0.0.1", port: 3001}
directory: {url: "https://directory.engagecloud.net"}
dispatcher: {max_in_flight: 0}
"#;
        let tmp = write_tmp_file(zero_concurrency);
        let config = Config::from_file(tmp.path()).unwrap();
        assert_eq!(config.validate(), Err(ValidationError::ZeroConcurrency));
    }

    #[test]
    fn test_missing_required_section_fails() {
        let tmp = write_tmp_file(r#"listener: {host: "0.0.0.0", port: 3000}"#);
        assert!(matches!(
            Config::from_file(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
