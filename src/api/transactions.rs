// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transfer submission endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::Auth,
    blockchain::{classify, TxClassification},
    error::ApiError,
    state::AppState,
};

/// Fixed message for transfers that never reached execution. The real cause
/// is logged, never disclosed: an unreachable endpoint and a bad signing key
/// must be indistinguishable to the caller.
pub const CREDENTIAL_FAILURE_MESSAGE: &str =
    "Failed to send transaction. Please check your credentials";

/// Request to send a transfer.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SendTransactionRequest {
    /// Caller-side reference for this transfer
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Amount in yoctoNEAR, strictly positive
    pub amount: u128,
    /// Recipient account ID
    pub to: String,
}

/// Transfer payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct TxHashResult {
    /// Transaction hash
    pub tx_hash: String,
}

/// Transfer response envelope.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendTransactionResponse {
    pub success: bool,
    pub result: TxHashResult,
}

/// Submit a value transfer from the relay account.
///
/// Exactly one outbound transfer call per request, no retries. The outcome
/// is classified into success (201), on-chain failure (400), or
/// transport/credential failure (401).
#[utoipa::path(
    post,
    path = "/send-transaction",
    tag = "Account",
    request_body = SendTransactionRequest,
    security(("api_secret" = [])),
    responses(
        (status = 201, description = "Transaction sent successfully", body = SendTransactionResponse),
        (status = 400, description = "Transaction executed but failed on chain"),
        (status = 401, description = "Unauthorized or credential failure"),
        (status = 422, description = "Invalid transaction data"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn send_transaction(
    _auth: Auth,
    State(state): State<AppState>,
    body: Result<Json<SendTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SendTransactionResponse>), ApiError> {
    let Json(request) =
        body.map_err(|rejection| ApiError::unprocessable(rejection.body_text().to_lowercase()))?;

    if request.amount == 0 {
        return Err(ApiError::unprocessable(
            "`amount` input should be greater than 0",
        ));
    }

    let outcome = match state.chain().transfer(&request.to, request.amount).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to send transaction. Reason: {e}");
            return Err(ApiError::unauthorized(CREDENTIAL_FAILURE_MESSAGE));
        }
    };

    match classify(&outcome) {
        TxClassification::Failed { hash, reason } => {
            tracing::error!(
                "Transaction to {} ({}) failed. Reason: {:?}",
                request.user_id,
                request.to,
                outcome.status
            );
            Err(ApiError::bad_request(format!(
                "Transaction {hash} failed. Reason: {reason}"
            )))
        }
        TxClassification::Succeeded { hash } => {
            tracing::info!(
                "Transaction to {} ({}) succeeded. Amount: {} yoctoNEAR",
                request.user_id,
                request.to,
                request.amount
            );
            Ok((
                StatusCode::CREATED,
                Json(SendTransactionResponse {
                    success: true,
                    result: TxHashResult { tx_hash: hash },
                }),
            ))
        }
    }
}
