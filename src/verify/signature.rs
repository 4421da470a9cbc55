// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Detached Ed25519 message-signature verification.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use ed25519_dalek::{Signature, Verifier, VerifyingKey, SIGNATURE_LENGTH};

use crate::{error::ServiceError, ledger::Address};

/// Verify a base64 `signature` over the UTF-8 bytes of `message` against the
/// base58 `address`.
///
/// Returns `Ok(false)` for a well-formed signature that does not verify.
/// Only missing or malformed input is an error.
pub fn verify_signature(
    address: &str,
    message: &str,
    signature: &str,
) -> Result<bool, ServiceError> {
    if address.trim().is_empty() || message.is_empty() || signature.trim().is_empty() {
        return Err(ServiceError::validation(
            "Public key, message and signature are required",
        ));
    }

    let address = Address::parse(address)?;
    let signature = decode_signature(signature)?;

    // Off-curve addresses (program-derived) cannot have signed anything.
    let Ok(verifying_key) = VerifyingKey::from_bytes(address.as_bytes()) else {
        tracing::debug!(%address, "Address is not a valid Ed25519 public key");
        return Ok(false);
    };

    Ok(verifying_key.verify(message.as_bytes(), &signature).is_ok())
}

fn decode_signature(encoded: &str) -> Result<Signature, ServiceError> {
    let bytes = BASE64
        .decode(encoded)
        .map_err(|e| ServiceError::validation(format!("Malformed signature: {e}")))?;

    let bytes: [u8; SIGNATURE_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
        ServiceError::validation(format!(
            "Malformed signature: expected {SIGNATURE_LENGTH} bytes, got {}",
            bytes.len()
        ))
    })?;

    Ok(Signature::from_bytes(&bytes))
}
