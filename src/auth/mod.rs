// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared-secret request gating.
//!
//! Use the `Auth` extractor in handlers to require the caller secret:
//!
//! ```rust,ignore
//! async fn my_handler(_auth: Auth) -> impl IntoResponse {
//!     // the X-API-Secret header matched the configured secret
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;

use crate::error::ApiError;
use crate::state::AppState;

/// Header the caller presents the shared secret in.
pub const API_SECRET_HEADER: &str = "x-api-secret";

/// Error message for a missing or mismatched secret.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized. Invalid X-API-Secret header";

/// Extractor that rejects any request whose `X-API-Secret` header does not
/// match the configured secret. Runs before the handler body, so no chain
/// interaction happens for unauthenticated requests.
#[derive(Debug)]
pub struct Auth;

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(API_SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        if secrets_match(presented, state.api_secret()) {
            Ok(Auth)
        } else {
            Err(ApiError::unauthorized(UNAUTHORIZED_MESSAGE))
        }
    }
}

// The comparison must not short-circuit on the first mismatched byte.
fn secrets_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
