// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use lazy_static::lazy_static;
use prometheus::proto::MetricFamily;
use prometheus::{Counter, Encoder, HistogramOpts, HistogramVec, Registry, TextEncoder};
use std::sync::OnceLock;
use thiserror::Error;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Metrics are not initialized")]
    NotInitialized,

    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Metrics output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

lazy_static! {
    // Created without registering to the default registry
    pub static ref HTTP_REQUESTS: Counter = Counter::new(
        "http_requests",
        "Total number of HTTP requests"
    )
    .expect("Failed to create http_requests counter");

    pub static ref HTTP_REQUEST_SUCCESS: Counter = Counter::new(
        "http_request_success",
        "Number of successful HTTP requests"
    )
    .expect("Failed to create http_request_success counter");

    pub static ref HTTP_REQUEST_ERROR: Counter = Counter::new(
        "http_request_error",
        "Number of HTTP request errors"
    )
    .expect("Failed to create http_request_error counter");

    pub static ref TXS_DECODED: Counter = Counter::new(
        "txs_decoded",
        "Number of transactions decoded successfully"
    )
    .expect("Failed to create txs_decoded counter");

    pub static ref TXS_DECODE_FAILED: Counter = Counter::new(
        "txs_decode_failed",
        "Number of transaction decode requests that failed"
    )
    .expect("Failed to create txs_decode_failed counter");

    pub static ref REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "request_duration_seconds",
            "Duration of HTTP requests in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["method", "route", "status_code"]
    )
    .expect("Failed to create request_duration_seconds histogram");

    pub static ref RESPONSE_SIZE_BYTES: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "response_size_bytes",
            "Size of HTTP responses in bytes"
        ).buckets(vec![100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0, 100000.0, 500000.0]),
        &["method", "route", "status_code"]
    )
    .expect("Failed to create response_size_bytes histogram");
}

/// Register every metric in a registry whose names carry `prefix`.
///
/// Only the first call has an effect.
pub fn init(prefix: &str) -> Result<(), MetricsError> {
    if REGISTRY.get().is_some() {
        return Ok(());
    }

    let prefix = (!prefix.is_empty()).then(|| prefix.to_string());
    let registry = Registry::new_custom(prefix, None)?;
    registry.register(Box::new(HTTP_REQUESTS.clone()))?;
    registry.register(Box::new(HTTP_REQUEST_SUCCESS.clone()))?;
    registry.register(Box::new(HTTP_REQUEST_ERROR.clone()))?;
    registry.register(Box::new(TXS_DECODED.clone()))?;
    registry.register(Box::new(TXS_DECODE_FAILED.clone()))?;
    registry.register(Box::new(REQUEST_DURATION_SECONDS.clone()))?;
    registry.register(Box::new(RESPONSE_SIZE_BYTES.clone()))?;

    // A concurrent initializer may have won; either registry is equivalent.
    let _ = REGISTRY.set(registry);
    Ok(())
}

pub fn is_initialized() -> bool {
    REGISTRY.get().is_some()
}

/// Count the outcome of a transaction decode request.
pub fn record_tx_decode(success: bool) {
    if success {
        TXS_DECODED.inc();
    } else {
        TXS_DECODE_FAILED.inc();
    }
}

pub fn gather_metric_families() -> Result<Vec<MetricFamily>, MetricsError> {
    REGISTRY
        .get()
        .map(Registry::gather)
        .ok_or(MetricsError::NotInitialized)
}

/// Gather all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, MetricsError> {
    let metric_families = gather_metric_families()?;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
