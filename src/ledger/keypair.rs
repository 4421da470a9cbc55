// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Keypair loading for the gateway's authority signer.
//!
//! Solana keypairs are 64 bytes: the 32-byte Ed25519 seed followed by the
//! 32-byte public key. Keys are accepted as a JSON byte array on disk (the
//! `solana-keygen` format) or as a base64 / base58 string.

use std::{fmt, fs, path::Path};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::{Signer, SigningKey, KEYPAIR_LENGTH};

use super::types::Address;
use crate::error::ServiceError;

/// An Ed25519 keypair.
pub struct Keypair(SigningKey);

impl Keypair {
    /// Build a keypair from the 64-byte secret key, checking that the public
    /// half matches the seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ServiceError> {
        let array: &[u8; KEYPAIR_LENGTH] = bytes.try_into().map_err(|_| {
            ServiceError::validation(format!(
                "Secret key must be {KEYPAIR_LENGTH} bytes, got {}",
                bytes.len()
            ))
        })?;

        SigningKey::from_keypair_bytes(array)
            .map(Self)
            .map_err(|_| ServiceError::validation("Secret key does not match its public key"))
    }

    pub fn pubkey(&self) -> Address {
        Address::new(self.0.verifying_key().to_bytes())
    }

    /// Sign `message`, returning the raw 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.0.sign(message).to_bytes()
    }

    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.0.to_keypair_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Keypair").field(&self.pubkey()).finish()
    }
}

impl From<SigningKey> for Keypair {
    fn from(key: SigningKey) -> Self {
        Self(key)
    }
}

/// Read a keypair stored as a JSON byte array at `dir/name`.
pub fn read_keypair(dir: impl AsRef<Path>, name: &str) -> Result<Keypair, ServiceError> {
    let path = dir.as_ref().join(name);
    let contents = fs::read_to_string(&path).map_err(|e| {
        ServiceError::internal(format!(
            "Failed to read keypair file {}: {}",
            path.display(),
            e
        ))
    })?;

    let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| {
        ServiceError::validation(format!(
            "Keypair file {} is not a JSON byte array: {}",
            path.display(),
            e
        ))
    })?;

    Keypair::from_bytes(&bytes)
}

/// Decode a base64-encoded secret key.
pub fn keypair_from_base64(encoded: &str) -> Result<Keypair, ServiceError> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ServiceError::validation(format!("Invalid base64 secret key: {e}")))?;
    Keypair::from_bytes(&bytes)
}

/// Decode a base58-encoded secret key.
pub fn keypair_from_base58(encoded: &str) -> Result<Keypair, ServiceError> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| ServiceError::validation(format!("Invalid base58 secret key: {e}")))?;
    Keypair::from_bytes(&bytes)
}
