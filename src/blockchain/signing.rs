// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing key handling.
//!
//! NEAR key material travels as `ed25519:<base58>`; secret keys are either
//! the 64-byte keypair (secret || public) or the bare 32-byte seed. This
//! module parses that encoding into an ed25519 signer for the relay account.

use ed25519_dalek::{Signer, SigningKey};

use super::client::ChainError;
use super::transaction::{PublicKey, Signature};

/// Curve prefix carried by encoded NEAR keys.
pub const ED25519_PREFIX: &str = "ed25519:";

/// ed25519 signer for the relay account.
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    /// Parse an encoded secret key (`ed25519:<base58>`, prefix optional).
    pub fn from_encoded_key(encoded: &str) -> Result<Self, ChainError> {
        let encoded = encoded.trim();
        let data = encoded.strip_prefix(ED25519_PREFIX).unwrap_or(encoded);

        let bytes = bs58::decode(data)
            .into_vec()
            .map_err(|e| ChainError::InvalidKey(e.to_string()))?;

        let signing_key = match bytes.len() {
            64 => {
                let mut keypair = [0u8; 64];
                keypair.copy_from_slice(&bytes);
                SigningKey::from_keypair_bytes(&keypair)
                    .map_err(|e| ChainError::InvalidKey(e.to_string()))?
            }
            32 => {
                let mut seed = [0u8; 32];
                seed.copy_from_slice(&bytes);
                SigningKey::from_bytes(&seed)
            }
            n => {
                return Err(ChainError::InvalidKey(format!(
                    "expected 32 or 64 key bytes, got {n}"
                )))
            }
        };

        Ok(Self { signing_key })
    }

    /// Raw public key bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Public key in transaction wire form.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::Ed25519(self.public_key_bytes())
    }

    /// Public key in the `ed25519:<base58>` encoding the RPC expects.
    pub fn encoded_public_key(&self) -> String {
        format!(
            "{ED25519_PREFIX}{}",
            bs58::encode(self.public_key_bytes()).into_string()
        )
    }

    /// Sign a message (the transaction digest).
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::Ed25519(self.signing_key.sign(message).to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Verifier, VerifyingKey};

    fn encoded_keypair(seed: [u8; 32]) -> String {
        let key = SigningKey::from_bytes(&seed);
        let mut keypair = [0u8; 64];
        keypair[..32].copy_from_slice(&seed);
        keypair[32..].copy_from_slice(&key.verifying_key().to_bytes());
        format!("{ED25519_PREFIX}{}", bs58::encode(keypair).into_string())
    }

    #[test]
    fn parses_64_byte_keypair_encoding() {
        let seed = [42u8; 32];
        let signer = Ed25519Signer::from_encoded_key(&encoded_keypair(seed)).expect("parse");
        assert_eq!(
            signer.public_key_bytes(),
            SigningKey::from_bytes(&seed).verifying_key().to_bytes()
        );
    }

    #[test]
    fn parses_32_byte_seed_with_and_without_prefix() {
        let seed = [7u8; 32];
        let encoded = bs58::encode(seed).into_string();

        let with_prefix =
            Ed25519Signer::from_encoded_key(&format!("{ED25519_PREFIX}{encoded}")).expect("parse");
        let without_prefix = Ed25519Signer::from_encoded_key(&encoded).expect("parse");
        assert_eq!(
            with_prefix.public_key_bytes(),
            without_prefix.public_key_bytes()
        );
    }

    #[test]
    fn encoded_public_key_carries_prefix() {
        let signer = Ed25519Signer::from_encoded_key(&encoded_keypair([1u8; 32])).expect("parse");
        assert!(signer.encoded_public_key().starts_with(ED25519_PREFIX));
    }

    #[test]
    fn signatures_verify_under_the_public_key() {
        let signer = Ed25519Signer::from_encoded_key(&encoded_keypair([9u8; 32])).expect("parse");
        let message = b"payload digest";
        let Signature::Ed25519(sig_bytes) = signer.sign(message);

        let verifying_key =
            VerifyingKey::from_bytes(&signer.public_key_bytes()).expect("public key");
        let signature = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        verifying_key
            .verify(message, &signature)
            .expect("signature verifies");
    }

    #[test]
    fn rejects_bad_encodings() {
        assert!(matches!(
            Ed25519Signer::from_encoded_key("ed25519:0OIl"),
            Err(ChainError::InvalidKey(_))
        ));
        assert!(matches!(
            Ed25519Signer::from_encoded_key(&format!(
                "{ED25519_PREFIX}{}",
                bs58::encode([1u8; 16]).into_string()
            )),
            Err(ChainError::InvalidKey(_))
        ));
    }

    #[test]
    fn rejects_inconsistent_keypair() {
        // 64 bytes whose public half does not match the secret half.
        let mut keypair = [0u8; 64];
        keypair[..32].copy_from_slice(&[3u8; 32]);
        keypair[32..].copy_from_slice(&[4u8; 32]);
        let encoded = format!("{ED25519_PREFIX}{}", bs58::encode(keypair).into_string());
        assert!(matches!(
            Ed25519Signer::from_encoded_key(&encoded),
            Err(ChainError::InvalidKey(_))
        ));
    }
}
