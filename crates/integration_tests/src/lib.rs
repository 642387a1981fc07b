// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod client;
pub mod harness;

pub use client::{ApiResponse, TestClient};
pub use harness::{TestServer, connect};

/// Test configuration constants
pub mod constants {
    /// Maximum number of retries when waiting for the API to be ready (in seconds)
    pub const API_READY_TIMEOUT_SECONDS: u32 = 30;
}

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
