// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::blockchain::ChainClient;

/// Shared application state: the long-lived chain handle and the caller
/// secret. Constructed once at startup, cloned per request.
#[derive(Clone)]
pub struct AppState {
    chain: Arc<dyn ChainClient>,
    api_secret: Arc<str>,
}

impl AppState {
    pub fn new(chain: Arc<dyn ChainClient>, api_secret: impl Into<Arc<str>>) -> Self {
        Self {
            chain,
            api_secret: api_secret.into(),
        }
    }

    pub fn chain(&self) -> &dyn ChainClient {
        self.chain.as_ref()
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}
