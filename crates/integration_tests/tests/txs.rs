// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use anyhow::Result;
use base64::{Engine, engine::general_purpose::STANDARD};
use integration_tests::{connect, init_tracing};
use serde_json::json;

const SAMPLE_TX_BASE64: &str = include_str!("../../auth/fixtures/std_tx.b64");

#[tokio::test]
async fn test_decode_then_encode_round_trip() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;
    let tx = SAMPLE_TX_BASE64.trim();

    let decoded = client.post_json("/txs/decode", &json!({ "txbase64": tx })).await?;
    assert!(decoded.is_success(), "decode failed: {}", decoded.body);
    let tx_json = decoded.json()?;
    assert_eq!(tx_json["type"], "cosmos-sdk/StdTx");
    assert_eq!(tx_json["value"]["memo"], "hello");

    let encoded = client.post_json("/txs/encode", &json!({ "tx": tx_json })).await?;
    assert!(encoded.is_success(), "encode failed: {}", encoded.body);
    assert_eq!(encoded.json()?["tx"], tx);
    Ok(())
}

#[tokio::test]
async fn test_decode_errors_are_plain_text() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;

    let bad_base64 = client.post_json("/txs/decode", &json!({ "txbase64": "%%%" })).await?;
    assert_eq!(bad_base64.status.as_u16(), 400);
    assert!(bad_base64.json().is_err(), "error body should not be JSON");

    let garbage = client
        .post_json("/txs/decode", &json!({ "txbase64": STANDARD.encode([1, 2, 3, 4, 5]) }))
        .await?;
    assert_eq!(garbage.status.as_u16(), 400);
    assert!(!garbage.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_concurrent_decodes_agree() -> Result<()> {
    init_tracing();
    let (client, _server) = connect().await?;
    let body = json!({ "txbase64": SAMPLE_TX_BASE64.trim() });

    let responses = futures::future::try_join_all(
        (0..16).map(|_| client.post_json("/txs/decode", &body)),
    )
    .await?;

    let first = &responses[0].body;
    for response in &responses {
        assert!(response.is_success());
        assert_eq!(&response.body, first);
    }
    Ok(())
}
