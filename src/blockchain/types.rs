// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wire views of NEAR RPC responses.
//!
//! Only the fields the relay consumes are modeled; everything else in the
//! response is ignored. The failure branch of [`ExecutionStatus`] stays an
//! opaque JSON value on purpose: its shape varies per failure kind and the
//! classifier inspects it structurally.

use serde::Deserialize;
use serde_json::Value;

/// `query/view_account` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountView {
    /// Balance in yoctoNEAR, as a decimal string.
    pub amount: String,
}

/// `query/view_access_key` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessKeyView {
    /// Nonce of the last transaction signed with this key.
    pub nonce: u64,
    /// Hash of the block the view was taken at, base58-encoded. Used to
    /// anchor the next transaction.
    pub block_hash: String,
}

/// Final execution status of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum ExecutionStatus {
    NotStarted,
    Started,
    /// Execution succeeded; carries the base64-encoded return value.
    SuccessValue(String),
    /// Execution failed; carries the structured failure descriptor.
    Failure(Value),
}

impl ExecutionStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionStatus::Failure(_))
    }
}

/// The transaction portion of a `broadcast_tx_commit` result.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionView {
    /// Transaction hash, base58-encoded.
    pub hash: String,
}

/// `broadcast_tx_commit` result.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalExecutionOutcome {
    pub status: ExecutionStatus,
    pub transaction: TransactionView,
}

/// Outcome of one submitted transfer: the hash plus its execution status.
#[derive(Debug, Clone)]
pub struct TransactionOutcome {
    pub hash: String,
    pub status: ExecutionStatus,
}

impl From<FinalExecutionOutcome> for TransactionOutcome {
    fn from(outcome: FinalExecutionOutcome) -> Self {
        Self {
            hash: outcome.transaction.hash,
            status: outcome.status,
        }
    }
}
