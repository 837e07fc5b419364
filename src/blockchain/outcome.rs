// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Execution-outcome classification.
//!
//! [`classify`] is a pure, total mapping from a transaction outcome to the
//! caller-facing verdict. It never panics, whatever shape the failure
//! descriptor arrives in.

use serde_json::Value;

use super::types::{ExecutionStatus, TransactionOutcome};

/// Reason reported when the failure descriptor carries no recognizable kind.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Caller-facing verdict for one submitted transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxClassification {
    Succeeded { hash: String },
    Failed { hash: String, reason: String },
}

/// Classify a transaction outcome.
///
/// Any status without a failure marker counts as success; the chain has
/// accepted and executed the transfer.
pub fn classify(outcome: &TransactionOutcome) -> TxClassification {
    match &outcome.status {
        ExecutionStatus::Failure(detail) => TxClassification::Failed {
            hash: outcome.hash.clone(),
            reason: failure_reason(detail).to_string(),
        },
        _ => TxClassification::Succeeded {
            hash: outcome.hash.clone(),
        },
    }
}

/// Extract the failure kind from `ActionError.kind`.
///
/// The kind is a one-entry object named after the error category; its first
/// key (wire order) is the reason. Unit kinds arrive as bare strings and
/// name the category directly. Anything else maps to [`UNKNOWN_ERROR`].
fn failure_reason(detail: &Value) -> &str {
    match detail.get("ActionError").and_then(|e| e.get("kind")) {
        Some(Value::Object(kind)) => kind
            .keys()
            .next()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ERROR),
        Some(Value::String(kind)) => kind,
        _ => UNKNOWN_ERROR,
    }
}
