// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressConfig {
    /// Address to bind the HTTP server to
    ///
    /// Env: LCD_EXPRESS_BIND_HOST
    /// Default: 127.0.0.1
    pub bind_host: String,

    /// Port to bind the HTTP server to
    ///
    /// Env: LCD_EXPRESS_PORT
    /// Default: 1317
    pub port: u16,

    /// Maximum accepted request body, in bytes
    ///
    /// Env: LCD_EXPRESS_REQUEST_LIMIT
    /// Default: 524288
    pub request_limit: usize,
}

pub(crate) fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    1317
}

pub(crate) fn default_request_limit() -> usize {
    512 * 1024
}

impl ExpressConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if url::Host::parse(&self.bind_host).is_err() {
            return Err(ConfigError::ValidateError(format!(
                "Invalid bind host '{}'",
                self.bind_host
            )));
        }

        if self.port == 0 {
            return Err(ConfigError::ValidateError(
                "Express port cannot be 0".to_string(),
            ));
        }

        if self.request_limit == 0 {
            return Err(ConfigError::ValidateError(
                "Request limit cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// `host:port` string for binding the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl Default for ExpressConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            request_limit: default_request_limit(),
        }
    }
}
