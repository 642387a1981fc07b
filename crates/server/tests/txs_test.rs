// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end tests of POST /txs/decode and POST /txs/encode through the router.

mod common;

use axum::http::StatusCode;
use base64::{Engine, engine::general_purpose::STANDARD};
use common::{app, app_with, post, sample_tx};
use config::LcdConfig;
use serde_json::json;

fn decode_body(txbase64: &str) -> String {
    json!({ "txbase64": txbase64 }).to_string()
}

fn assert_plain_text_error(resp: &common::TestResponse, status: StatusCode) {
    assert_eq!(resp.status, status, "body: {}", resp.body);
    assert!(!resp.body.is_empty());
    assert!(
        resp.content_type.as_deref().unwrap_or_default().starts_with("text/plain"),
        "unexpected content type {:?}",
        resp.content_type
    );
}

#[tokio::test]
async fn decode_returns_transaction_json() {
    let resp = post(app(), "/txs/decode", decode_body(sample_tx())).await;

    assert_eq!(resp.status, StatusCode::OK, "body: {}", resp.body);
    assert_eq!(resp.content_type.as_deref(), Some("application/json"));

    let json = resp.json();
    assert_eq!(json["type"], "cosmos-sdk/StdTx");
    let value = &json["value"];
    assert_eq!(value["msg"][0]["type"], "cosmos-sdk/MsgSend");
    assert_eq!(
        value["msg"][0]["value"]["from_address"],
        "cosmos1l6qjcyhn4dxwdtzak6dvx5heqm93ky00e87nsc"
    );
    assert_eq!(
        value["msg"][0]["value"]["to_address"],
        "cosmos1qgpqyqszqgpqyqszqgpqyqszqgpqyqszrh8mx2"
    );
    assert_eq!(value["msg"][0]["value"]["amount"], json!([{"denom": "atom", "amount": "10"}]));
    assert_eq!(value["fee"]["gas"], "200000");
    assert_eq!(
        value["signatures"][0]["pub_key"],
        json!({
            "type": "tendermint/PubKeyEd25519",
            "value": "6kpsY+KcUgq+9VB7Ey7F+ZVHdq6+vnuSQh7qaRRG0iw="
        })
    );
    assert_eq!(value["memo"], "hello");
}

#[tokio::test]
async fn decode_body_matches_direct_codec_output() {
    let codec = auth::default_codec().unwrap();
    let bytes = STANDARD.decode(sample_tx()).unwrap();
    let tx: auth::StdTx = codec.unmarshal_binary(&bytes).unwrap();
    let expected = String::from_utf8(codec.marshal_json(&tx).unwrap()).unwrap();

    let resp = post(app(), "/txs/decode", decode_body(sample_tx())).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, expected);
}

#[tokio::test]
async fn encode_of_decoded_output_restores_the_input() {
    let decoded = post(app(), "/txs/decode", decode_body(sample_tx())).await;
    assert_eq!(decoded.status, StatusCode::OK);

    let body = json!({ "tx": decoded.json() }).to_string();
    let encoded = post(app(), "/txs/encode", body).await;

    assert_eq!(encoded.status, StatusCode::OK, "body: {}", encoded.body);
    assert_eq!(encoded.json(), json!({ "tx": sample_tx() }));
}

#[tokio::test]
async fn decode_rejects_malformed_requests() {
    let bodies = [
        "not json".to_string(),
        "{}".to_string(),
        json!({ "txbase64": sample_tx(), "extra": true }).to_string(),
        json!({ "txbase64": 42 }).to_string(),
    ];
    for body in bodies {
        let resp = post(app(), "/txs/decode", body).await;
        assert_plain_text_error(&resp, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn decode_rejects_invalid_base64() {
    let resp = post(app(), "/txs/decode", decode_body("not base64!")).await;
    assert_plain_text_error(&resp, StatusCode::BAD_REQUEST);

    let unpadded = sample_tx().trim_end_matches('=');
    assert_ne!(unpadded, sample_tx());
    let resp = post(app(), "/txs/decode", decode_body(unpadded)).await;
    assert_plain_text_error(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn decode_rejects_undecodable_payloads() {
    let mut trailing = STANDARD.decode(sample_tx()).unwrap();
    trailing.push(0);

    let mut truncated = STANDARD.decode(sample_tx()).unwrap();
    truncated.truncate(truncated.len() - 3);

    let payloads = [
        Vec::new(),
        vec![0xde, 0xad, 0xbe, 0xef, 0x00],
        trailing,
        truncated,
    ];
    for payload in payloads {
        let resp = post(app(), "/txs/decode", decode_body(&STANDARD.encode(&payload))).await;
        assert_plain_text_error(&resp, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn encode_rejects_bad_transaction_json() {
    let bodies = [
        json!({ "tx": { "type": "cosmos-sdk/Unknown", "value": {} } }).to_string(),
        json!({ "tx": "plain string" }).to_string(),
        json!({ "transaction": {} }).to_string(),
    ];
    for body in bodies {
        let resp = post(app(), "/txs/encode", body).await;
        assert_plain_text_error(&resp, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let mut config = LcdConfig::default();
    config.express.request_limit = 64;

    let resp = post(app_with(config), "/txs/decode", decode_body(sample_tx())).await;
    assert_eq!(resp.status, StatusCode::PAYLOAD_TOO_LARGE);
}
