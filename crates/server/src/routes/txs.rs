// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Router, routing::post};

use crate::{
    handlers::txs,
    routes::{RegisterRoute, RouteRegistry},
    state::AppState,
};

/// Create transaction codec routes.
pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(registry, "/txs/decode", "post", post(txs::decode_tx))
        .route_registered(registry, "/txs/encode", "post", post(txs::encode_tx))
}
