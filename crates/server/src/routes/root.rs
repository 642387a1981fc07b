// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Root endpoint handler.
//!
//! Returns service information and the list of registered routes.

use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// Handler for GET /
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    let routes = state.route_registry.routes();

    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/openapi.json",
        "listen": state.config.express.bind_address(),
        "routes": routes
    }))
}
