// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The relay's chain account handle.
//!
//! [`NearAccount`] is the single long-lived connection to the chain: built
//! once at startup, verified before traffic is served, and shared read-only
//! across requests for the process lifetime. Handlers reach it through the
//! [`ChainClient`] trait so request handling stays testable without a
//! network.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::Mutex;

use super::client::{ChainError, NearRpcClient};
use super::signing::Ed25519Signer;
use super::transaction::{encode_signed_transaction, sign_transaction, Transaction};
use super::types::TransactionOutcome;

/// Chain operations the relay performs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Current account balance in yoctoNEAR.
    async fn get_balance(&self) -> Result<u128, ChainError>;

    /// Submit a transfer and wait for its execution outcome. An `Err` means
    /// the transfer never reached execution (transport, signing, or
    /// credential fault); an `Ok` outcome may still carry an on-chain
    /// failure in its status.
    async fn transfer(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, ChainError>;
}

/// The relay account: RPC endpoint, identity, and signing key.
pub struct NearAccount {
    rpc: NearRpcClient,
    account_id: String,
    signer: Ed25519Signer,
    // Transfers serialize through this lock so signing nonces stay strictly
    // ordered; balance queries never take it.
    transfer_lock: Mutex<()>,
}

impl NearAccount {
    pub fn new(rpc: NearRpcClient, account_id: String, signer: Ed25519Signer) -> Self {
        Self {
            rpc,
            account_id,
            signer,
            transfer_lock: Mutex::new(()),
        }
    }

    /// Verify the account's access key before the service accepts traffic.
    pub async fn startup(&self) -> Result<(), ChainError> {
        let key = self
            .rpc
            .view_access_key(&self.account_id, &self.signer.encoded_public_key())
            .await?;
        tracing::info!(
            account_id = %self.account_id,
            nonce = key.nonce,
            "chain account ready"
        );
        Ok(())
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }
}

#[async_trait]
impl ChainClient for NearAccount {
    async fn get_balance(&self) -> Result<u128, ChainError> {
        let account = self.rpc.view_account(&self.account_id).await?;
        account.amount.parse::<u128>().map_err(|e| {
            ChainError::MalformedResponse(format!("invalid balance `{}`: {e}", account.amount))
        })
    }

    async fn transfer(
        &self,
        receiver_id: &str,
        amount: u128,
    ) -> Result<TransactionOutcome, ChainError> {
        let _guard = self.transfer_lock.lock().await;

        // Re-read the access key per transfer: the nonce must be fresh and
        // the block hash recent enough to anchor the transaction.
        let key = self
            .rpc
            .view_access_key(&self.account_id, &self.signer.encoded_public_key())
            .await?;
        let block_hash = decode_block_hash(&key.block_hash)?;

        let transaction = Transaction::transfer(
            self.account_id.clone(),
            self.signer.public_key(),
            key.nonce + 1,
            receiver_id.to_string(),
            block_hash,
            amount,
        );

        let signed = sign_transaction(transaction, &self.signer)?;
        let encoded = encode_signed_transaction(&signed)?;

        let outcome = self.rpc.broadcast_tx_commit(&encoded).await?;
        Ok(TransactionOutcome::from(outcome))
    }
}

fn decode_block_hash(encoded: &str) -> Result<[u8; 32], ChainError> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| ChainError::MalformedResponse(format!("invalid block hash: {e}")))?;
    if bytes.len() != 32 {
        return Err(ChainError::MalformedResponse(format!(
            "invalid block hash length {}",
            bytes.len()
        )));
    }
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(hash)
}
