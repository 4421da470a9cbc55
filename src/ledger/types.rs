// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ledger types and constants.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::ServiceError;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Decimal places of the native currency.
pub const SOL_DECIMALS: u8 = 9;

/// The System Program, which owns native SOL transfers.
pub const SYSTEM_PROGRAM_ID: Address = Address([0u8; 32]);

/// Solana network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// RPC endpoint URL
    pub rpc_url: &'static str,
}

/// Solana mainnet-beta configuration.
pub const SOLANA_MAINNET: NetworkConfig = NetworkConfig {
    name: "mainnet-beta",
    rpc_url: "https://api.mainnet-beta.solana.com",
};

/// Solana devnet configuration.
pub const SOLANA_DEVNET: NetworkConfig = NetworkConfig {
    name: "devnet",
    rpc_url: "https://api.devnet.solana.com",
};

/// Solana testnet configuration.
pub const SOLANA_TESTNET: NetworkConfig = NetworkConfig {
    name: "testnet",
    rpc_url: "https://api.testnet.solana.com",
};

/// Look up a network preset by name.
pub fn network_by_name(raw: &str) -> Option<NetworkConfig> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "devnet" => Some(SOLANA_DEVNET),
        "testnet" => Some(SOLANA_TESTNET),
        "mainnet" | "mainnet-beta" => Some(SOLANA_MAINNET),
        _ => None,
    }
}

/// A 32-byte Ed25519 public key, rendered as base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 32]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseAddressError {
    #[error("Invalid base58 address: {0}")]
    InvalidBase58(String),

    #[error("Address must decode to 32 bytes, got {0}")]
    InvalidLength(usize),
}

impl Address {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a caller-supplied address, rejecting anything but 32 bytes.
    pub fn parse(raw: &str) -> Result<Self, ServiceError> {
        raw.parse()
            .map_err(|e: ParseAddressError| ServiceError::validation(e.to_string()))
    }
}

impl FromStr for Address {
    type Err = ParseAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ParseAddressError::InvalidBase58(e.to_string()))?;
        let array: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| ParseAddressError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

/// Identifier of a ledger transaction (its first signature on Solana).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(raw: impl Into<String>) -> Result<Self, ServiceError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::validation("Transaction id is required"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Finality tier requested from the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl CommitmentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitmentLevel::Processed => "processed",
            CommitmentLevel::Confirmed => "confirmed",
            CommitmentLevel::Finalized => "finalized",
        }
    }
}

impl FromStr for CommitmentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(CommitmentLevel::Processed),
            "confirmed" => Ok(CommitmentLevel::Confirmed),
            "finalized" => Ok(CommitmentLevel::Finalized),
            other => Err(format!("Unknown commitment level `{other}`")),
        }
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One compiled instruction of a transaction message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    /// Index of the invoked program in the participant list
    pub program_id_index: u8,
    /// Indices of the instruction's accounts in the participant list
    pub accounts: Vec<u8>,
    /// Raw instruction data
    pub data: Vec<u8>,
}

/// A transaction as fetched from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub fee: u64,
    /// On-chain execution error, `None` when the transaction succeeded
    pub error: Option<String>,
    /// Static account keys followed by lookup-table loaded addresses
    pub account_keys: Vec<Address>,
    pub instructions: Vec<CompiledInstruction>,
}

impl TransactionRecord {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    /// Resolve an account index into the participant list.
    pub fn account(&self, index: u8) -> Option<&Address> {
        self.account_keys.get(index as usize)
    }

    /// Program invoked by `instruction`, if its index resolves.
    pub fn program_id(&self, instruction: &CompiledInstruction) -> Option<&Address> {
        self.account(instruction.program_id_index)
    }
}

/// Account state as returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub lamports: u64,
    pub owner: Address,
    pub executable: bool,
    pub rent_epoch: u64,
    pub data: Vec<u8>,
}

/// Format lamports as SOL, trimming trailing zeros.
pub fn format_sol(lamports: u64) -> String {
    let whole = lamports / LAMPORTS_PER_SOL;
    let remainder = lamports % LAMPORTS_PER_SOL;

    if remainder == 0 {
        return whole.to_string();
    }

    let decimal_str = format!("{:0>width$}", remainder, width = SOL_DECIMALS as usize);
    format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
}

/// Parse a human-readable SOL amount into lamports.
///
/// Accepts at most nine decimal places and rejects negative or overflowing
/// values.
pub fn parse_sol(amount: &str) -> Result<u64, ServiceError> {
    let amount = amount.trim();
    let parts: Vec<&str> = amount.split('.').collect();

    if parts.len() > 2 || parts[0].is_empty() && parts.get(1).is_none_or(|d| d.is_empty()) {
        return Err(ServiceError::validation(format!(
            "Invalid SOL amount `{amount}`"
        )));
    }

    if !parts[0].chars().all(|c| c.is_ascii_digit()) {
        return Err(ServiceError::validation(format!(
            "Invalid SOL amount `{amount}`"
        )));
    }

    let whole = if parts[0].is_empty() {
        0
    } else {
        parts[0]
            .parse::<u64>()
            .map_err(|_| ServiceError::validation(format!("Invalid SOL amount `{amount}`")))?
    };

    let fraction = match parts.get(1) {
        Some(dec_str) if !dec_str.is_empty() => {
            if dec_str.len() > SOL_DECIMALS as usize {
                return Err(ServiceError::validation(format!(
                    "Too many decimal places (max {SOL_DECIMALS})"
                )));
            }
            if !dec_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(ServiceError::validation(format!(
                    "Invalid SOL amount `{amount}`"
                )));
            }
            let padded = format!("{:0<width$}", dec_str, width = SOL_DECIMALS as usize);
            padded
                .parse::<u64>()
                .map_err(|_| ServiceError::validation(format!("Invalid SOL amount `{amount}`")))?
        }
        _ => 0,
    };

    whole
        .checked_mul(LAMPORTS_PER_SOL)
        .and_then(|w| w.checked_add(fraction))
        .ok_or_else(|| ServiceError::validation("SOL amount overflows"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_program_renders_as_ones() {
        assert_eq!(
            SYSTEM_PROGRAM_ID.to_string(),
            "11111111111111111111111111111111"
        );
        let parsed: Address = "11111111111111111111111111111111".parse().unwrap();
        assert_eq!(parsed, SYSTEM_PROGRAM_ID);
    }

    #[test]
    fn address_rejects_wrong_length() {
        let short = bs58::encode([1u8; 31]).into_string();
        assert_eq!(
            short.parse::<Address>(),
            Err(ParseAddressError::InvalidLength(31))
        );

        let long = bs58::encode([1u8; 33]).into_string();
        assert_eq!(
            long.parse::<Address>(),
            Err(ParseAddressError::InvalidLength(33))
        );

        assert!(matches!(
            "0OIl".parse::<Address>(),
            Err(ParseAddressError::InvalidBase58(_))
        ));
        assert!(matches!(Address::parse(""), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn address_with_surrounding_whitespace_is_rejected() {
        let padded = format!(" {} ", Address::new([42u8; 32]));
        assert!(matches!(
            padded.parse::<Address>(),
            Err(ParseAddressError::InvalidBase58(_))
        ));
    }

    #[test]
    fn address_display_roundtrips() {
        let addr = Address::new([42u8; 32]);
        assert_eq!(addr.to_string().parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn transaction_id_must_not_be_empty() {
        assert!(TransactionId::new("   ").is_err());
        assert_eq!(TransactionId::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn commitment_parses_case_insensitively() {
        assert_eq!(
            "Finalized".parse::<CommitmentLevel>().unwrap(),
            CommitmentLevel::Finalized
        );
        assert!("max".parse::<CommitmentLevel>().is_err());
        assert_eq!(CommitmentLevel::default().as_str(), "confirmed");
    }

    #[test]
    fn test_format_sol() {
        assert_eq!(format_sol(0), "0");
        assert_eq!(format_sol(LAMPORTS_PER_SOL), "1");
        assert_eq!(format_sol(1_500_000_000), "1.5");
        assert_eq!(format_sol(1), "0.000000001");
    }

    #[test]
    fn test_parse_sol() {
        assert_eq!(parse_sol("1").unwrap(), LAMPORTS_PER_SOL);
        assert_eq!(parse_sol("1.5").unwrap(), 1_500_000_000);
        assert_eq!(parse_sol("0.000000001").unwrap(), 1);
        assert_eq!(parse_sol(".25").unwrap(), 250_000_000);
        assert_eq!(parse_sol("2.").unwrap(), 2 * LAMPORTS_PER_SOL);
    }

    #[test]
    fn test_parse_sol_rejects_bad_input() {
        assert!(parse_sol("").is_err());
        assert!(parse_sol(".").is_err());
        assert!(parse_sol("-1").is_err());
        assert!(parse_sol("1.2.3").is_err());
        assert!(parse_sol("0.0000000001").is_err());
        assert!(parse_sol("abc").is_err());
        assert!(parse_sol("1.-5").is_err());
        assert!(parse_sol("18446744074").is_err());
        assert!(parse_sol("+1").is_err());
        assert!(parse_sol("+1.5").is_err());
    }
}
