// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The ledger contract consumed by the verifiers and wallet handlers.

use async_trait::async_trait;

use super::types::{AccountInfo, Address, CommitmentLevel, TransactionId, TransactionRecord};

/// Read and airdrop access to a ledger node.
///
/// Implementations enforce their own per-call timeout and perform no retries.
/// Absence is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch a transaction at the given commitment level.
    async fn get_transaction(
        &self,
        id: &TransactionId,
        commitment: CommitmentLevel,
    ) -> Result<Option<TransactionRecord>, LedgerError>;

    /// Native balance in lamports.
    async fn get_balance(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<u64, LedgerError>;

    async fn get_account_info(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<Option<AccountInfo>, LedgerError>;

    /// Request an airdrop and return its transaction id.
    async fn request_airdrop(
        &self,
        address: &Address,
        lamports: u64,
    ) -> Result<TransactionId, LedgerError>;

    /// Whether the node reports itself healthy.
    async fn health(&self) -> Result<(), LedgerError>;
}

/// Errors that can occur while talking to the ledger node.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC transport error: {0}")]
    Transport(String),

    #[error("RPC request timed out")]
    Timeout,

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
}
