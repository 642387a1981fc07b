// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use integration_tests::{connect, init_tracing};

#[tokio::test]
async fn test_basic_endpoints() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;

    let (status, health_json) = client.get_json("/health").await?;
    assert!(status.is_success(), "Health endpoint should return success status");
    assert_eq!(health_json["status"], "ok", "Health status should be 'ok'");

    let (status, version_json) = client.get_json("/version").await?;
    assert!(status.is_success(), "Version endpoint should return success status");
    assert!(
        !version_json["version"].as_str().unwrap_or_default().is_empty(),
        "Version should be a non-empty string"
    );
    Ok(())
}

#[tokio::test]
async fn test_health_consistency() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;

    for i in 0..5 {
        let (status, health_json) = client.get_json("/health").await?;
        assert!(status.is_success(), "attempt {}", i + 1);
        assert_eq!(health_json["status"], "ok", "attempt {}", i + 1);
    }
    Ok(())
}

#[tokio::test]
async fn test_root_lists_tx_routes() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;

    let (status, root) = client.get_json("/").await?;
    assert!(status.is_success());
    let paths: Vec<&str> = root["routes"]
        .as_array()
        .map(|routes| routes.iter().filter_map(|r| r["path"].as_str()).collect())
        .unwrap_or_default();
    assert!(paths.contains(&"/txs/decode"));
    assert!(paths.contains(&"/txs/encode"));

    let response = client.get("/no/such/route").await?;
    assert_eq!(response.status.as_u16(), 404);
    Ok(())
}
