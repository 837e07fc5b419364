// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-RPC transport for the NEAR endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::types::{AccessKeyView, AccountView, FinalExecutionOutcome};

/// JSON-RPC client over the configured NEAR endpoint.
pub struct NearRpcClient {
    http: reqwest::Client,
    rpc_url: Url,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl NearRpcClient {
    /// Create a client for the given endpoint. Every outbound call is
    /// bounded by `timeout`; a timeout surfaces as a transport fault.
    pub fn new(rpc_url: Url, timeout: Duration) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            rpc_url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Issue a single JSON-RPC call and return its `result` value.
    async fn call(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainError::MalformedResponse(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(ChainError::Rpc {
                code: error.code,
                message: match error.data {
                    Some(data) => format!("{} ({data})", error.message),
                    None => error.message,
                },
            });
        }

        body.result
            .ok_or_else(|| ChainError::MalformedResponse("response carries no result".to_string()))
    }

    /// View the account state (balance lives in `amount`).
    pub async fn view_account(&self, account_id: &str) -> Result<AccountView, ChainError> {
        let result = self
            .call(
                "query",
                json!({
                    "request_type": "view_account",
                    "finality": "optimistic",
                    "account_id": account_id,
                }),
            )
            .await?;
        parse_query_result(result)
    }

    /// View an access key: current nonce plus a recent block hash to anchor
    /// the next transaction.
    pub async fn view_access_key(
        &self,
        account_id: &str,
        public_key: &str,
    ) -> Result<AccessKeyView, ChainError> {
        let result = self
            .call(
                "query",
                json!({
                    "request_type": "view_access_key",
                    "finality": "final",
                    "account_id": account_id,
                    "public_key": public_key,
                }),
            )
            .await?;
        parse_query_result(result)
    }

    /// Broadcast a signed transaction and wait for its execution outcome.
    pub async fn broadcast_tx_commit(
        &self,
        signed_tx_base64: &str,
    ) -> Result<FinalExecutionOutcome, ChainError> {
        let result = self
            .call("broadcast_tx_commit", json!([signed_tx_base64]))
            .await?;
        serde_json::from_value(result).map_err(|e| ChainError::MalformedResponse(e.to_string()))
    }
}

/// `query` reports request-level problems (unknown account, unknown key)
/// inside the result object rather than as an RPC error.
fn parse_query_result<T: DeserializeOwned>(result: Value) -> Result<T, ChainError> {
    if let Some(error) = result.get("error").and_then(Value::as_str) {
        return Err(ChainError::Query(error.to_string()));
    }
    serde_json::from_value(result).map_err(|e| ChainError::MalformedResponse(e.to_string()))
}

/// Errors raised by chain operations. All of them count as
/// transport-or-credential faults to the relay caller.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid signing key: {0}")]
    InvalidKey(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("query error: {0}")]
    Query(String),

    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
