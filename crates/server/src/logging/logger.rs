// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Name of the active log file inside the log directory.
pub const LOG_FILE_NAME: &str = "logs.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to install the global subscriber: {0}")]
    InitError(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for logging initialization
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
}

impl<'a> LoggingConfig<'a> {
    pub fn from_config(log: &'a config::LogConfig) -> Self {
        Self {
            level: &log.level,
            json_format: log.json,
            strip_ansi: log.strip_ansi,
            write_to_file: log.write,
            write_path: &log.write_path,
            write_max_file_size: log.write_max_file_size,
            write_max_files: log.write_max_files,
        }
    }
}

/// Build the filter for a configured level. `http` enables the per-request
/// log lines on top of `info`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = if level == "http" { "info,http=debug" } else { level };
    EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Initialize tracing/logging with the specified configuration
///
/// # Examples
/// ```no_run
/// use server::logging::{self, LoggingConfig};
///
/// logging::init_with_config(LoggingConfig {
///     level: "http",
///     json_format: false,
///     strip_ansi: false,
///     write_to_file: true,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
/// })?;
/// # Ok::<(), server::logging::LoggingError>(())
/// ```
///
/// # Log Rotation
/// When a log file reaches `write_max_file_size`, it is rotated:
/// - Current: logs.log
/// - After rotation: logs.log.1, logs.log.2, etc.
/// - Keeps `write_max_files` files in total, the current one included
pub fn init_with_config(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config.level)?;

    let file_writer = if config.write_to_file {
        Some(file_writer(&config)?)
    } else {
        None
    };

    let (console, file) = if config.json_format {
        let console = fmt::layer().json().boxed();
        let file = file_writer.map(|writer| fmt::layer().json().with_writer(writer).boxed());
        (console, file)
    } else {
        let console = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(!config.strip_ansi)
            .boxed();
        let file = file_writer.map(|writer| {
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(writer)
                .boxed()
        });
        (console, file)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    Ok(())
}

fn file_writer(config: &LoggingConfig) -> Result<NonBlocking, LoggingError> {
    std::fs::create_dir_all(config.write_path)?;

    let log_file_path = PathBuf::from(config.write_path).join(LOG_FILE_NAME);
    let file_appender = BasicRollingFileAppender::new(
        log_file_path,
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        config.write_max_files.saturating_sub(1),
    )?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The writer flushes on drop of the guard, which must live as long as the process.
    std::mem::forget(guard);
    Ok(non_blocking)
}
