// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "system",
    summary = "Service version",
    responses(
        (status = 200, description = "Running package version", body = VersionResponse)
    )
)]
pub async fn get_version() -> (StatusCode, Json<VersionResponse>) {
    let response = VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
