// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the REST API. Request fields use
//! snake_case; the camelCase names of the earlier Node service are accepted
//! as aliases so existing clients keep working.
//!
//! Successful responses are wrapped in [`ApiResponse`]; errors use the body
//! produced by [`crate::error::ApiError`].

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ServiceError, ledger::parse_sol};

// =============================================================================
// Envelope
// =============================================================================

/// Success envelope: a human-readable message plus the payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

// =============================================================================
// Amounts
// =============================================================================

/// A SOL amount given either as a JSON number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum SolAmount {
    Number(f64),
    Text(String),
}

impl SolAmount {
    /// Convert to lamports, rejecting negative, non-finite or over-precise
    /// values.
    pub fn to_lamports(&self) -> Result<u64, ServiceError> {
        match self {
            SolAmount::Number(n) if !n.is_finite() => {
                Err(ServiceError::validation("SOL amount must be a finite number"))
            }
            // f64's Display never uses exponent notation.
            SolAmount::Number(n) => parse_sol(&n.to_string()),
            SolAmount::Text(s) => parse_sol(s),
        }
    }
}

// =============================================================================
// Wallet Models
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HelloQuery {
    /// Name to greet
    pub name: Option<String>,
}

/// Native balance of an address.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Base58 address
    pub address: String,
    /// Network name
    pub network: String,
    /// Balance in lamports
    pub lamports: u64,
    /// Balance in SOL
    pub sol: String,
}

/// On-chain account state.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountInfoResponse {
    pub address: String,
    pub lamports: u64,
    /// Owning program
    pub owner: String,
    pub executable: bool,
    pub rent_epoch: u64,
    /// Account data, base64
    pub data: String,
    /// Data length in bytes
    pub space: usize,
}

/// Request an airdrop of test SOL.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AirdropRequest {
    /// Recipient address (base58)
    #[serde(default, alias = "walletAddress")]
    pub wallet_address: String,
    /// Amount in SOL; absent or zero means 1 SOL
    #[serde(default, alias = "solAmount")]
    pub sol_amount: Option<SolAmount>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AirdropResponse {
    /// Airdrop transaction id
    pub tx_id: String,
    pub address: String,
    pub lamports: u64,
}

// =============================================================================
// Verification Models
// =============================================================================

/// Verify a detached message signature.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifySignatureRequest {
    /// Signer address (base58)
    #[serde(default, alias = "publicKey")]
    pub public_key: String,
    /// The signed UTF-8 message
    #[serde(default)]
    pub message: String,
    /// Ed25519 signature (base64, 64 bytes)
    #[serde(default)]
    pub signature: String,
}

/// Verify that a donation transfer happened on-chain.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VerifyTransactionRequest {
    /// Transaction signature
    #[serde(default, alias = "txid")]
    pub tx_id: String,
    /// Donor address (base58)
    #[serde(default, alias = "donatorWalletAddress")]
    pub donor_address: String,
    /// Campaign address (base58)
    #[serde(default, alias = "campaignWalletAddress")]
    pub campaign_address: String,
    /// Claimed amount in SOL
    #[serde(default, alias = "recivedSOL")]
    pub claimed_amount: Option<SolAmount>,
}

/// Outcome of a verification. `false` is a successful answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VerificationResult {
    pub valid: bool,
}
