// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{logging, metrics, openapi, routes, state::AppState};
use axum::{Router, middleware, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Build the router with every route and layer.
///
/// Metrics routes and the metrics middleware are only added when metrics are
/// enabled in the configuration.
pub fn create_app(state: AppState) -> Router {
    let registry = &state.route_registry;
    let metrics_enabled = state.config.metrics.enabled;
    let request_limit = state.config.express.request_limit;

    let mut router = Router::new()
        .route("/", get(routes::root::root_handler))
        .route("/openapi.json", get(openapi::openapi_json))
        .merge(routes::health::routes(registry))
        .merge(routes::version::routes(registry))
        .merge(routes::txs::routes(registry));

    if metrics_enabled {
        router = router
            .merge(routes::metrics::routes())
            .layer(middleware::from_fn(metrics::metrics_middleware));
    }

    router
        .layer(middleware::from_fn(logging::http_logger_middleware))
        .layer(RequestBodyLimitLayer::new(request_limit))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
