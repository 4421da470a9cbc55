// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory ledger used by unit tests in place of a live RPC node.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{LedgerClient, LedgerError};
use super::types::*;

/// How the fake node should misbehave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Every call times out.
    Timeout,
    /// Every call answers with a JSON-RPC error object.
    RpcError,
    /// Every call blocks forever.
    Hang,
}

#[derive(Default)]
pub struct InMemoryLedger {
    transactions: HashMap<String, TransactionRecord>,
    balances: HashMap<Address, u64>,
    accounts: HashMap<Address, AccountInfo>,
    fault: Option<Fault>,
    calls: AtomicUsize,
    last_commitment: Mutex<Option<CommitmentLevel>>,
    pub airdrops: Mutex<Vec<(Address, u64)>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transaction(mut self, id: &str, record: TransactionRecord) -> Self {
        self.transactions.insert(id.to_string(), record);
        self
    }

    pub fn with_balance(mut self, address: Address, lamports: u64) -> Self {
        self.balances.insert(address, lamports);
        self
    }

    pub fn with_account(mut self, address: Address, account: AccountInfo) -> Self {
        self.accounts.insert(address, account);
        self
    }

    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Number of ledger calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_commitment(&self) -> Option<CommitmentLevel> {
        *self.last_commitment.lock().unwrap()
    }

    async fn enter(&self, commitment: Option<CommitmentLevel>) -> Result<(), LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if commitment.is_some() {
            *self.last_commitment.lock().unwrap() = commitment;
        }
        match self.fault {
            None => Ok(()),
            Some(Fault::Timeout) => Err(LedgerError::Timeout),
            Some(Fault::RpcError) => Err(LedgerError::Rpc {
                code: -32005,
                message: "Node is unhealthy".to_string(),
            }),
            Some(Fault::Hang) => std::future::pending().await,
        }
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn get_transaction(
        &self,
        id: &TransactionId,
        commitment: CommitmentLevel,
    ) -> Result<Option<TransactionRecord>, LedgerError> {
        self.enter(Some(commitment)).await?;
        Ok(self.transactions.get(id.as_str()).cloned())
    }

    async fn get_balance(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<u64, LedgerError> {
        self.enter(Some(commitment)).await?;
        Ok(self.balances.get(address).copied().unwrap_or(0))
    }

    async fn get_account_info(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<Option<AccountInfo>, LedgerError> {
        self.enter(Some(commitment)).await?;
        Ok(self.accounts.get(address).cloned())
    }

    async fn request_airdrop(
        &self,
        address: &Address,
        lamports: u64,
    ) -> Result<TransactionId, LedgerError> {
        self.enter(None).await?;
        let mut airdrops = self.airdrops.lock().unwrap();
        airdrops.push((*address, lamports));
        TransactionId::new(format!("airdrop-{}", airdrops.len()))
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))
    }

    async fn health(&self) -> Result<(), LedgerError> {
        self.enter(None).await
    }
}

/// Deterministic test address.
pub fn address(seed: u8) -> Address {
    Address::new([seed; 32])
}

/// System Program `Transfer` instruction data.
pub fn transfer_data(lamports: u64) -> Vec<u8> {
    let mut data = 2u32.to_le_bytes().to_vec();
    data.extend_from_slice(&lamports.to_le_bytes());
    data
}

/// A successful transaction with participants `[donor, campaign, system]`
/// and one System transfer from donor to campaign.
pub fn transfer_record(donor: Address, campaign: Address, lamports: u64) -> TransactionRecord {
    TransactionRecord {
        slot: 1,
        block_time: Some(1_717_000_000),
        fee: 5000,
        error: None,
        account_keys: vec![donor, campaign, SYSTEM_PROGRAM_ID],
        instructions: vec![CompiledInstruction {
            program_id_index: 2,
            accounts: vec![0, 1],
            data: transfer_data(lamports),
        }],
    }
}
