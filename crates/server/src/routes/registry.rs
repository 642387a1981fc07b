// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Route registry for endpoint introspection.
//!
//! Routes added through [`RegisterRoute::route_registered`] are recorded so
//! the root endpoint can list them and the OpenAPI document can be checked
//! against them.

use axum::{Router, routing::MethodRouter};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Information about a registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// The path pattern (e.g., "/txs/decode")
    pub path: String,
    /// The HTTP method (e.g., "get", "post")
    pub method: String,
}

/// A thread-safe registry of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry(Arc<RwLock<Vec<RouteInfo>>>);

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route to the registry. Registering the same route twice is a no-op.
    pub fn add(&self, path: &str, method: &str) {
        if let Ok(mut routes) = self.0.write() {
            let info = RouteInfo {
                path: path.to_string(),
                method: method.to_string(),
            };
            if !routes.contains(&info) {
                routes.push(info);
            }
        }
    }

    /// All registered routes, in registration order.
    pub fn routes(&self) -> Vec<RouteInfo> {
        self.0.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Extension trait for registering routes with automatic registry tracking.
pub trait RegisterRoute<S: Clone + Send + Sync + 'static> {
    fn route_registered(
        self,
        registry: &RouteRegistry,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self;
}

impl<S: Clone + Send + Sync + 'static> RegisterRoute<S> for Router<S> {
    fn route_registered(
        self,
        registry: &RouteRegistry,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self {
        registry.add(path, method);
        self.route(path, handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn test_registered_routes_are_listed_once() {
        let registry = RouteRegistry::new();
        let _router: Router = Router::new()
            .route_registered(&registry, "/health", "get", get(|| async { "ok" }))
            .route_registered(&registry, "/version", "get", get(|| async { "v" }));
        registry.add("/health", "get");

        let paths: Vec<String> = registry.routes().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, ["/health", "/version"]);
    }
}
