// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction wire format.
//!
//! NEAR transactions are borsh-serialized, signed over the sha256 of the
//! serialized payload, and broadcast base64-encoded. Only the `Transfer`
//! action is modeled; the enum tags below must match the protocol schema.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use borsh::BorshSerialize;
use sha2::{Digest, Sha256};

use super::client::ChainError;
use super::signing::Ed25519Signer;

/// Public key in wire form. ed25519 is key type 0 in the protocol schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519([u8; 32]),
}

impl BorshSerialize for PublicKey {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        match self {
            PublicKey::Ed25519(bytes) => {
                0u8.serialize(writer)?;
                writer.write_all(bytes)
            }
        }
    }
}

/// Transaction signature. ed25519 is signature type 0 in the protocol schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Ed25519([u8; 64]),
}

impl BorshSerialize for Signature {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        match self {
            Signature::Ed25519(bytes) => {
                0u8.serialize(writer)?;
                writer.write_all(bytes)
            }
        }
    }
}

/// Transaction action. `Transfer` sits at index 3 of the protocol's action
/// enum; the preceding variants are never built by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Transfer { deposit: u128 },
}

impl BorshSerialize for Action {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        match self {
            Action::Transfer { deposit } => {
                3u8.serialize(writer)?;
                deposit.serialize(writer)
            }
        }
    }
}

/// Unsigned transaction.
#[derive(Debug, Clone, BorshSerialize)]
pub struct Transaction {
    pub signer_id: String,
    pub public_key: PublicKey,
    pub nonce: u64,
    pub receiver_id: String,
    pub block_hash: [u8; 32],
    pub actions: Vec<Action>,
}

/// Signed transaction, ready for `broadcast_tx_commit`.
#[derive(Debug, Clone, BorshSerialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Signature,
}

impl Transaction {
    /// Build a single-action transfer.
    pub fn transfer(
        signer_id: String,
        public_key: PublicKey,
        nonce: u64,
        receiver_id: String,
        block_hash: [u8; 32],
        deposit: u128,
    ) -> Self {
        Self {
            signer_id,
            public_key,
            nonce,
            receiver_id,
            block_hash,
            actions: vec![Action::Transfer { deposit }],
        }
    }
}

/// Sign a transaction. The signature covers `sha256(borsh(transaction))`.
pub fn sign_transaction(
    transaction: Transaction,
    signer: &Ed25519Signer,
) -> Result<SignedTransaction, ChainError> {
    let payload =
        borsh::to_vec(&transaction).map_err(|e| ChainError::Serialization(e.to_string()))?;
    let digest: [u8; 32] = Sha256::digest(&payload).into();
    let signature = signer.sign(&digest);

    Ok(SignedTransaction {
        transaction,
        signature,
    })
}

/// Encode a signed transaction for the `broadcast_tx_commit` params.
pub fn encode_signed_transaction(signed: &SignedTransaction) -> Result<String, ChainError> {
    let bytes = borsh::to_vec(signed).map_err(|e| ChainError::Serialization(e.to_string()))?;
    Ok(BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{SigningKey, Verifier};

    fn test_signer() -> Ed25519Signer {
        let seed = [42u8; 32];
        Ed25519Signer::from_encoded_key(&bs58::encode(seed).into_string()).expect("signer")
    }

    fn sample_transaction() -> Transaction {
        Transaction::transfer(
            "relay.near".to_string(),
            PublicKey::Ed25519([1u8; 32]),
            7,
            "bob.near".to_string(),
            [2u8; 32],
            5,
        )
    }

    #[test]
    fn borsh_layout_matches_the_protocol() {
        let encoded = borsh::to_vec(&sample_transaction()).expect("serialize");

        let mut expected = Vec::new();
        expected.extend_from_slice(&10u32.to_le_bytes()); // signer_id length
        expected.extend_from_slice(b"relay.near");
        expected.push(0); // ed25519 key type
        expected.extend_from_slice(&[1u8; 32]);
        expected.extend_from_slice(&7u64.to_le_bytes()); // nonce
        expected.extend_from_slice(&8u32.to_le_bytes()); // receiver_id length
        expected.extend_from_slice(b"bob.near");
        expected.extend_from_slice(&[2u8; 32]); // block hash
        expected.extend_from_slice(&1u32.to_le_bytes()); // action count
        expected.push(3); // Transfer action index
        expected.extend_from_slice(&5u128.to_le_bytes()); // deposit

        assert_eq!(encoded, expected);
    }

    #[test]
    fn signed_transaction_appends_tagged_signature() {
        let signer = test_signer();
        let transaction = sample_transaction();
        let unsigned = borsh::to_vec(&transaction).expect("serialize");

        let signed = sign_transaction(transaction, &signer).expect("sign");
        let encoded = borsh::to_vec(&signed).expect("serialize");

        assert_eq!(encoded.len(), unsigned.len() + 1 + 64);
        assert_eq!(&encoded[..unsigned.len()], &unsigned[..]);
        assert_eq!(encoded[unsigned.len()], 0); // ed25519 signature type
    }

    #[test]
    fn signature_covers_the_payload_digest() {
        let signer = test_signer();
        let transaction = sample_transaction();
        let payload = borsh::to_vec(&transaction).expect("serialize");
        let digest: [u8; 32] = Sha256::digest(&payload).into();

        let signed = sign_transaction(transaction, &signer).expect("sign");
        let Signature::Ed25519(sig_bytes) = signed.signature;

        let verifying_key = SigningKey::from_bytes(&[42u8; 32]).verifying_key();
        verifying_key
            .verify(&digest, &ed25519_dalek::Signature::from_bytes(&sig_bytes))
            .expect("signature verifies");
    }

    #[test]
    fn base64_encoding_round_trips() {
        let signer = test_signer();
        let signed = sign_transaction(sample_transaction(), &signer).expect("sign");
        let encoded = encode_signed_transaction(&signed).expect("encode");

        let decoded = BASE64.decode(encoded).expect("decode");
        assert_eq!(decoded, borsh::to_vec(&signed).expect("serialize"));
    }
}
