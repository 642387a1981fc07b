// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use prometheus::proto::{MetricFamily, MetricType};
use serde_json::{Value, json};

/// Prometheus exposition format.
pub async fn get_metrics() -> Response {
    match crate::metrics::gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to gather metrics: {e}"),
        )
            .into_response(),
    }
}

/// The same families as [`get_metrics`], rendered as JSON.
pub async fn get_metrics_json() -> Response {
    match crate::metrics::gather_metric_families() {
        Ok(families) => {
            let body: Vec<Value> = families.iter().map(family_json).collect();
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to gather metrics: {e}"),
        )
            .into_response(),
    }
}

fn family_json(family: &MetricFamily) -> Value {
    let kind = family.get_field_type();
    let metrics: Vec<Value> = family
        .get_metric()
        .iter()
        .map(|metric| {
            let labels: serde_json::Map<String, Value> = metric
                .get_label()
                .iter()
                .map(|l| (l.get_name().to_string(), json!(l.get_value())))
                .collect();
            let value = match kind {
                MetricType::COUNTER => json!(metric.get_counter().get_value()),
                MetricType::GAUGE => json!(metric.get_gauge().get_value()),
                MetricType::HISTOGRAM => {
                    let h = metric.get_histogram();
                    json!({
                        "sample_count": h.get_sample_count(),
                        "sample_sum": h.get_sample_sum(),
                    })
                }
                _ => Value::Null,
            };
            json!({ "labels": labels, "value": value })
        })
        .collect();

    json!({
        "name": family.get_name(),
        "help": family.get_help(),
        "type": format!("{kind:?}").to_lowercase(),
        "metrics": metrics,
    })
}
