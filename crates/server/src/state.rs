// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::routes::RouteRegistry;
use auth::{Codec, RegistryError};
use config::LcdConfig;
use std::sync::Arc;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<LcdConfig>,
    pub codec: Arc<Codec>,
    pub route_registry: RouteRegistry,
}

impl AppState {
    /// Build the state with the auth module codec.
    pub fn new(config: LcdConfig) -> Result<Self, RegistryError> {
        Ok(Self::with_codec(config, auth::default_codec()?))
    }

    pub fn with_codec(config: LcdConfig, codec: Codec) -> Self {
        Self {
            config: Arc::new(config),
            codec: Arc::new(codec),
            route_registry: RouteRegistry::new(),
        }
    }
}
