//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `motehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use chrono::TimeDelta;
use motehub_adapter_udp::UdpConfig;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mote datagram channel settings.
    pub udp: UdpConfig,
    /// Keep-alive timeout and sweep cadence.
    pub liveness: LivenessConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Liveness sweeper configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LivenessConfig {
    /// A mote silent for longer than this is evicted from the registry.
    pub keep_alive_timeout_secs: u64,
    /// How often the sweeper runs.
    pub sweep_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `motehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("motehub.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("MOTEHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.udp.bind_host = host
                    .trim_start_matches('[')
                    .trim_end_matches(']')
                    .to_string();
                if let Ok(port) = port.parse() {
                    self.udp.bind_port = port;
                }
            }
        }
        if let Some(port) = var("MOTEHUB_MOTE_PORT").and_then(|val| val.parse().ok()) {
            self.udp.mote_port = port;
        }
        if let Some(secs) = var("MOTEHUB_KEEP_ALIVE_TIMEOUT_SECS").and_then(|val| val.parse().ok())
        {
            self.liveness.keep_alive_timeout_secs = secs;
        }
        if let Some(secs) = var("MOTEHUB_SWEEP_INTERVAL_SECS").and_then(|val| val.parse().ok()) {
            self.liveness.sweep_interval_secs = secs;
        }
        if let Some(val) = var("MOTEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.udp.bind_port == 0 {
            return Err(ConfigError::Validation(
                "udp.bind_port must be non-zero".to_string(),
            ));
        }
        if self.udp.mote_port == 0 {
            return Err(ConfigError::Validation(
                "udp.mote_port must be non-zero".to_string(),
            ));
        }
        if self.udp.max_datagram_size == 0 {
            return Err(ConfigError::Validation(
                "udp.max_datagram_size must be non-zero".to_string(),
            ));
        }
        if self.liveness.keep_alive_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "liveness.keep_alive_timeout_secs must be non-zero".to_string(),
            ));
        }
        let representable = TimeDelta::try_seconds(self.keep_alive_timeout_secs_i64())
            .and_then(|timeout| motehub_domain::time::now().checked_add_signed(timeout))
            .is_some();
        if !representable {
            return Err(ConfigError::Validation(
                "liveness.keep_alive_timeout_secs is too large".to_string(),
            ));
        }
        if self.liveness.sweep_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "liveness.sweep_interval_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    fn keep_alive_timeout_secs_i64(&self) -> i64 {
        i64::try_from(self.liveness.keep_alive_timeout_secs).unwrap_or(i64::MAX)
    }

    /// Staleness window after which a silent mote is evicted.
    #[must_use]
    pub fn keep_alive_timeout(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.keep_alive_timeout_secs_i64()).unwrap_or(TimeDelta::MAX)
    }

    /// Period of the liveness sweep.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.liveness.sweep_interval_secs)
    }
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout_secs: 180,
            sweep_interval_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "motehubd=info,motehub=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.udp.bind_host, "::");
        assert_eq!(config.udp.bind_port, 5678);
        assert_eq!(config.udp.mote_port, 8765);
        assert_eq!(config.liveness.keep_alive_timeout_secs, 180);
        assert_eq!(config.liveness.sweep_interval_secs, 30);
        assert_eq!(config.logging.filter, "motehubd=info,motehub=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.udp.bind_port, 5678);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [udp]
            bind_host = 'bbbb::1'
            bind_port = 6000
            mote_port = 7000
            max_datagram_size = 512

            [liveness]
            keep_alive_timeout_secs = 60
            sweep_interval_secs = 5

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.udp.bind_host, "bbbb::1");
        assert_eq!(config.udp.bind_port, 6000);
        assert_eq!(config.udp.mote_port, 7000);
        assert_eq!(config.udp.max_datagram_size, 512);
        assert_eq!(config.liveness.keep_alive_timeout_secs, 60);
        assert_eq!(config.liveness.sweep_interval_secs, 5);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [liveness]
            sweep_interval_secs = 10
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.liveness.sweep_interval_secs, 10);
        assert_eq!(config.liveness.keep_alive_timeout_secs, 180);
        assert_eq!(config.udp.mote_port, 8765);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.udp.bind_port, 5678);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }

    #[test]
    fn should_override_bind_with_bracketed_ipv6() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("MOTEHUB_BIND", "[bbbb::1]:6000")]));
        assert_eq!(config.udp.bind_host, "bbbb::1");
        assert_eq!(config.udp.bind_port, 6000);
        assert_eq!(config.udp.bind_addr(), "[bbbb::1]:6000");
    }

    #[test]
    fn should_override_bind_with_ipv4() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("MOTEHUB_BIND", "127.0.0.1:7000")]));
        assert_eq!(config.udp.bind_host, "127.0.0.1");
        assert_eq!(config.udp.bind_port, 7000);
    }

    #[test]
    fn should_override_numeric_fields() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("MOTEHUB_MOTE_PORT", "9000"),
            ("MOTEHUB_KEEP_ALIVE_TIMEOUT_SECS", "20"),
            ("MOTEHUB_SWEEP_INTERVAL_SECS", "2"),
        ]));
        assert_eq!(config.udp.mote_port, 9000);
        assert_eq!(config.keep_alive_timeout(), TimeDelta::seconds(20));
        assert_eq!(config.sweep_interval(), Duration::from_secs(2));
    }

    #[test]
    fn should_ignore_unparsable_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("MOTEHUB_MOTE_PORT", "lots")]));
        assert_eq!(config.udp.mote_port, 8765);
    }

    #[test]
    fn should_prefer_rust_log_over_motehub_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("MOTEHUB_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_accept_defaults() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn should_reject_zero_ports() {
        let mut config = Config::default();
        config.udp.bind_port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.udp.mote_port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_liveness_settings() {
        let mut config = Config::default();
        config.liveness.keep_alive_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.liveness.sweep_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_timeout_beyond_timestamp_range() {
        let mut config = Config::default();
        config.liveness.keep_alive_timeout_secs = 10_000_000_000_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_long_but_representable_timeout() {
        let mut config = Config::default();
        config.liveness.keep_alive_timeout_secs = 365 * 24 * 3600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_reject_timeout_beyond_time_delta_range() {
        let mut config = Config::default();
        config.liveness.keep_alive_timeout_secs = u64::MAX;
        assert!(config.validate().is_err());
    }
}
