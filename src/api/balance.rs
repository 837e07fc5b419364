// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account balance endpoint.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::Auth, error::ApiError, state::AppState};

/// Balance payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResult {
    /// Account balance in yoctoNEAR
    pub balance: u128,
}

/// Balance response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct GetBalanceResponse {
    pub success: bool,
    pub result: BalanceResult,
}

/// Get the relay account balance.
///
/// A chain fault here is not individually guarded; it surfaces as the
/// generic 500 envelope and the service keeps serving.
#[utoipa::path(
    get,
    path = "/",
    tag = "Account",
    security(("api_secret" = [])),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = GetBalanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_account_balance(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<GetBalanceResponse>, ApiError> {
    let balance = state.chain().get_balance().await.map_err(|e| {
        tracing::error!("balance query failed: {e}");
        ApiError::internal(e)
    })?;

    tracing::info!("Account balance: {balance} yoctoNEAR");

    Ok(Json(GetBalanceResponse {
        success: true,
        result: BalanceResult { balance },
    }))
}
