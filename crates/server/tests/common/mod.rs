// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use config::LcdConfig;
use http_body_util::BodyExt;
use server::{app::create_app, state::AppState};
use tower::ServiceExt;

/// Base64 of a signed transaction carrying one bank send.
pub const SAMPLE_TX_BASE64: &str = include_str!("../../../auth/fixtures/std_tx.b64");

pub fn sample_tx() -> &'static str {
    SAMPLE_TX_BASE64.trim()
}

pub fn app_with(config: LcdConfig) -> Router {
    create_app(AppState::new(config).unwrap())
}

pub fn app() -> Router {
    app_with(LcdConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

pub async fn send(app: Router, method: Method, uri: &str, body: impl Into<Body>) -> TestResponse {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    TestResponse {
        status,
        content_type,
        body: String::from_utf8_lossy(&bytes).to_string(),
    }
}

pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post(app: Router, uri: &str, body: impl Into<String>) -> TestResponse {
    send(app, Method::POST, uri, body.into()).await
}
