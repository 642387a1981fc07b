// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Every test in this binary shares the process-wide registry, initialised
//! with the `test` prefix.

mod common;

use axum::http::StatusCode;
use common::{app_with, get, post, sample_tx};
use config::LcdConfig;
use server::metrics;
use server::metrics::registry::{HTTP_REQUESTS, TXS_DECODE_FAILED, TXS_DECODED};

fn metrics_config() -> LcdConfig {
    let mut config = LcdConfig::default();
    config.metrics.enabled = true;
    config
}

#[test]
fn test_metrics_initialization() {
    metrics::init("test").unwrap();
    assert!(metrics::is_initialized());

    let text = metrics::gather_metrics().unwrap();
    for name in [
        "test_http_requests",
        "test_http_request_success",
        "test_http_request_error",
        "test_txs_decoded",
        "test_txs_decode_failed",
    ] {
        assert!(text.contains(name), "missing {name}");
    }
}

#[test]
fn test_record_tx_decode() {
    metrics::init("test").unwrap();

    let decoded = TXS_DECODED.get();
    let failed = TXS_DECODE_FAILED.get();
    metrics::record_tx_decode(true);
    metrics::record_tx_decode(false);
    metrics::record_tx_decode(false);

    assert!(TXS_DECODED.get() >= decoded + 1.0);
    assert!(TXS_DECODE_FAILED.get() >= failed + 2.0);
}

#[tokio::test]
async fn test_requests_are_counted_and_exposed() {
    metrics::init("test").unwrap();
    let before = HTTP_REQUESTS.get();

    let body = serde_json::json!({ "txbase64": sample_tx() }).to_string();
    let resp = post(app_with(metrics_config()), "/txs/decode", body).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(HTTP_REQUESTS.get() >= before + 1.0);

    let text = get(app_with(metrics_config()), "/metrics").await;
    assert_eq!(text.status, StatusCode::OK);
    assert!(text.body.contains("test_request_duration_seconds"));
    assert!(text.body.contains("route=\"/txs/decode\""));

    let json = get(app_with(metrics_config()), "/metrics.json").await;
    assert_eq!(json.status, StatusCode::OK);
    let families = json.json();
    assert!(
        families
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["name"] == "test_txs_decoded" && f["type"] == "counter")
    );
}
