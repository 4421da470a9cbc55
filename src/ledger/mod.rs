// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana ledger integration.
//!
//! This module provides:
//! - The [`LedgerClient`] contract the verifiers depend on
//! - A JSON-RPC implementation of it ([`SolanaRpcClient`])
//! - Address, commitment and transaction types
//! - Keypair loading for the authority signer

pub mod client;
pub mod keypair;
pub mod rpc;
pub mod types;

#[cfg(test)]
pub mod testing;

pub use client::{LedgerClient, LedgerError};
pub use keypair::{keypair_from_base58, keypair_from_base64, read_keypair, Keypair};
pub use rpc::SolanaRpcClient;
pub use types::*;
