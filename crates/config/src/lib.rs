// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod express;
mod log;
mod metrics;

pub use args::Args;
pub use error::ConfigError;
pub use express::ExpressConfig;
pub use log::LogConfig;
pub use metrics::{MetricsConfig, MetricsError};

use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix of every setting.
pub const ENV_PREFIX: &str = "LCD_";

/// Flat view of the `LCD_*` environment, as read by `envy`.
#[derive(Debug, Deserialize)]
struct EnvVars {
    #[serde(default = "express::default_bind_host")]
    express_bind_host: String,
    #[serde(default = "express::default_port")]
    express_port: u16,
    #[serde(default = "express::default_request_limit")]
    express_request_limit: usize,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default)]
    metrics_enabled: bool,
    #[serde(default = "metrics::default_prometheus_prefix")]
    metrics_prometheus_prefix: String,
}

impl From<EnvVars> for LcdConfig {
    fn from(env: EnvVars) -> Self {
        Self {
            express: ExpressConfig {
                bind_host: env.express_bind_host,
                port: env.express_port,
                request_limit: env.express_request_limit,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            metrics: MetricsConfig {
                enabled: env.metrics_enabled,
                prometheus_prefix: env.metrics_prometheus_prefix,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LcdConfig {
    pub express: ExpressConfig,
    pub log: LogConfig,
    pub metrics: MetricsConfig,
}

impl LcdConfig {
    /// Load and validate the configuration from `LCD_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Self = envy::prefixed(ENV_PREFIX).from_env::<EnvVars>()?.into();
        config.validate()?;
        Ok(config)
    }

    /// Load variables from an env file into the process environment.
    ///
    /// Variables already set take precedence. Returns `false` when the file
    /// does not exist.
    pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(false);
        }
        dotenv::from_path(path).map_err(|e| ConfigError::EnvFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(true)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.express.validate()?;
        self.log.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: [&str; 6] = [
        "LCD_EXPRESS_PORT",
        "LCD_EXPRESS_BIND_HOST",
        "LCD_LOG_LEVEL",
        "LCD_LOG_JSON",
        "LCD_METRICS_ENABLED",
        "LCD_METRICS_PROMETHEUS_PREFIX",
    ];

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment run serially.
            unsafe { std::env::remove_var(var) };
        }
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment run serially.
        unsafe { std::env::set_var(key, value) };
    }

    #[test]
    fn test_default_config() {
        let config = LcdConfig::default();
        assert_eq!(config.express.port, 1317);
        assert_eq!(config.log.level, "info");
        assert!(!config.metrics.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = LcdConfig::from_env().unwrap();
        assert_eq!(config, LcdConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("LCD_EXPRESS_PORT", "8080");
        set_env("LCD_EXPRESS_BIND_HOST", "0.0.0.0");
        set_env("LCD_LOG_LEVEL", "http");
        set_env("LCD_LOG_JSON", "true");
        set_env("LCD_METRICS_ENABLED", "true");
        set_env("LCD_METRICS_PROMETHEUS_PREFIX", "lcd");

        let config = LcdConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.express.port, 8080);
        assert_eq!(config.express.bind_host, "0.0.0.0");
        assert_eq!(config.log.level, "http");
        assert!(config.log.json);
        assert!(config.metrics.enabled);
        assert_eq!(config.metrics.prometheus_prefix, "lcd");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        clear_env();
        set_env("LCD_LOG_LEVEL", "loud");
        assert!(matches!(
            LcdConfig::from_env(),
            Err(ConfigError::ValidateError(_))
        ));

        clear_env();
        set_env("LCD_EXPRESS_PORT", "not-a-port");
        assert!(matches!(LcdConfig::from_env(), Err(ConfigError::EnvError(_))));

        clear_env();
        set_env("LCD_METRICS_PROMETHEUS_PREFIX", "bad-prefix");
        assert!(matches!(
            LcdConfig::from_env(),
            Err(ConfigError::MetricsError(_))
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_env_file() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "LCD_EXPRESS_PORT=4000").unwrap();
        writeln!(file, "LCD_LOG_LEVEL=debug").unwrap();

        assert!(LcdConfig::load_env_file(file.path()).unwrap());
        let config = LcdConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.express.port, 4000);
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        assert!(!LcdConfig::load_env_file("/nonexistent/.env.missing").unwrap());
    }
}
