// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),
}

/// Configuration for Prometheus metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Enable or disable metrics collection and the `/metrics` routes
    ///
    /// Env: LCD_METRICS_ENABLED
    /// Default: false
    pub enabled: bool,

    /// Prometheus metric name prefix
    ///
    /// Env: LCD_METRICS_PROMETHEUS_PREFIX
    /// Default: lcd_rest_api
    pub prometheus_prefix: String,
}

pub(crate) fn default_prometheus_prefix() -> String {
    "lcd_rest_api".to_string()
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prometheus_prefix: default_prometheus_prefix(),
        }
    }
}

impl MetricsConfig {
    pub fn validate(&self) -> Result<(), MetricsError> {
        // Must match [a-zA-Z_:][a-zA-Z0-9_:]*
        let mut chars = self.prometheus_prefix.chars();
        let Some(first) = chars.next() else {
            return Ok(());
        };
        let valid_first = first.is_ascii_alphabetic() || first == '_' || first == ':';
        let valid_rest = chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == ':');
        if !valid_first || !valid_rest {
            return Err(MetricsError::InvalidPrometheusPrefix(
                self.prometheus_prefix.clone(),
            ));
        }

        Ok(())
    }
}
