// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::{Context, Result};
use colored::Colorize;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Default timeout for regular API requests
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Short timeout for health check connections (2 seconds)
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

/// HTTP client for making API requests during tests
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: Client,
    health_check_client: Client,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(DEFAULT_REQUEST_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            health_check_client: Client::builder()
                .timeout(HEALTH_CHECK_TIMEOUT)
                .build()
                .expect("Failed to create health check client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, url: String) -> Result<ApiResponse> {
        let response = request
            .send()
            .await
            .context(format!("Failed to send request to {}", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        Ok(ApiResponse { status, body, url })
    }

    /// Make a GET request to the API
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        let url = self.url(path);
        self.send(self.client.get(&url), url).await
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json(&self, path: &str) -> Result<(reqwest::StatusCode, Value)> {
        let response = self.get(path).await?;
        Ok((response.status, response.json()?))
    }

    /// POST a JSON body to the API
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        let url = self.url(path);
        self.send(self.client.post(&url).json(body), url).await
    }

    /// Wait for the API to be ready
    ///
    /// Uses a short timeout for health checks to fail fast when no server is running.
    pub async fn wait_for_ready(&self, max_retries: u32) -> Result<()> {
        let url = self.url("/health");

        for i in 0..max_retries {
            match self.health_check_client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("API at {} is ready after {} attempt(s)", self.base_url, i + 1);
                    return Ok(());
                }
                Ok(response) => {
                    println!(
                        "  Attempt {}/{}: Server returned status {}",
                        i + 1,
                        max_retries,
                        response.status()
                    );
                }
                Err(e) => {
                    let reason = if e.is_connect() {
                        "connection refused"
                    } else if e.is_timeout() {
                        "timeout"
                    } else {
                        "error"
                    };
                    println!(
                        "  Attempt {}/{}: {} ({})",
                        i + 1,
                        max_retries,
                        reason,
                        format!("{:.1}s timeout", HEALTH_CHECK_TIMEOUT.as_secs_f32()).bright_black()
                    );
                }
            }

            if i + 1 < max_retries {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }

        println!(
            "\n{} API at {} did not become ready after {} seconds",
            "error:".red().bold(),
            self.base_url.cyan(),
            max_retries
        );
        println!(
            "\n{} Unset API_URL to test an in-process server, or start one with:",
            "hint:".cyan().bold()
        );
        println!("  cargo run --release --bin lcd-rest-api\n");

        anyhow::bail!(
            "API at {} did not become ready after {} attempts",
            self.base_url,
            max_retries
        )
    }
}

/// API response wrapper
#[derive(Debug)]
pub struct ApiResponse {
    pub status: reqwest::StatusCode,
    pub body: String,
    pub url: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Parse the response body as JSON
    pub fn json(&self) -> Result<Value> {
        serde_json::from_str(&self.body)
            .context(format!("Failed to parse JSON response from {}", self.url))
    }
}
