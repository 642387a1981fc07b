// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process server for tests.
//!
//! When `API_URL` is set the tests target that deployment instead.

use crate::{TestClient, constants::API_READY_TIMEOUT_SECONDS};
use anyhow::{Context, Result};
use config::LcdConfig;
use ::server::{app::create_app, state::AppState};
use std::{env, net::SocketAddr};
use tokio::task::JoinHandle;

/// A server bound to an ephemeral local port, stopped on drop.
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(config: LcdConfig) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind test listener")?;
        let addr = listener.local_addr()?;
        let app = create_app(AppState::new(config)?);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("test server stopped: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Client for `API_URL`, or for a freshly spawned server with default settings.
///
/// The returned server handle must be kept alive for the duration of the test.
pub async fn connect() -> Result<(TestClient, Option<TestServer>)> {
    let (base_url, server) = match env::var("API_URL") {
        Ok(url) => (url, None),
        Err(_) => {
            let server = TestServer::spawn(LcdConfig::default()).await?;
            (server.base_url(), Some(server))
        }
    };

    let client = TestClient::new(base_url);
    client.wait_for_ready(API_READY_TIMEOUT_SECONDS).await?;
    Ok((client, server))
}
