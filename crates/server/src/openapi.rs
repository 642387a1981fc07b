// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LCD REST API",
        description = "Light-client REST service decoding and encoding auth transactions.",
        license(name = "GPL-3.0-or-later")
    ),
    servers(
        (url = "http://localhost:1317", description = "Localhost")
    ),
    tags(
        (name = "system", description = "Health and version"),
        (name = "txs", description = "Transaction binary/JSON conversion"),
    ),
    paths(
        crate::handlers::health::get_health::get_health,
        crate::handlers::version::get_version::get_version,
        crate::handlers::txs::decode::decode_tx,
        crate::handlers::txs::encode::encode_tx,
    )
)]
pub struct ApiDoc;

/// Handler for GET /openapi.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{self, RouteRegistry};
    use std::collections::BTreeSet;

    fn build_full_registry() -> RouteRegistry {
        let registry = RouteRegistry::new();
        let _ = routes::health::routes(&registry);
        let _ = routes::version::routes(&registry);
        let _ = routes::txs::routes(&registry);
        registry
    }

    /// Every registered route has an OpenAPI path and vice versa.
    #[test]
    fn openapi_paths_match_registered_routes() {
        let registered: BTreeSet<String> = build_full_registry()
            .routes()
            .into_iter()
            .map(|r| format!("{} {}", r.method.to_uppercase(), r.path))
            .collect();

        let spec =
            serde_json::to_value(ApiDoc::openapi()).expect("Failed to serialize OpenAPI spec");
        let mut documented = BTreeSet::new();
        for (path, methods) in spec["paths"].as_object().expect("paths object") {
            for method in methods.as_object().expect("methods object").keys() {
                if matches!(method.as_str(), "get" | "post" | "put" | "delete" | "patch") {
                    documented.insert(format!("{} {}", method.to_uppercase(), path));
                }
            }
        }

        assert_eq!(
            registered, documented,
            "OpenAPI document is out of sync with registered routes"
        );
    }
}
