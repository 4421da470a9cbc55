// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! On-chain donation transfer verification.
//!
//! A claim is confirmed when the referenced transaction succeeded and one of
//! its System Program instructions moves funds from the donor's account to
//! the campaign's account. Instruction order inside the transaction does not
//! matter.

use std::{str::FromStr, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::{
    error::ServiceError,
    ledger::{
        Address, CommitmentLevel, CompiledInstruction, LedgerClient, TransactionId,
        TransactionRecord, SYSTEM_PROGRAM_ID,
    },
};

/// System Program instruction tag for `Transfer`.
const SYSTEM_TRANSFER_TAG: u32 = 2;

/// How the claimed amount is compared with the on-chain transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AmountCheck {
    /// Only donor and campaign accounts are matched.
    #[default]
    Ignore,
    /// The transfer must move at least the claimed lamports.
    AtLeast,
    /// The transfer must move exactly the claimed lamports.
    Exact,
}

impl FromStr for AmountCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" | "off" => Ok(AmountCheck::Ignore),
            "at_least" | "at-least" => Ok(AmountCheck::AtLeast),
            "exact" => Ok(AmountCheck::Exact),
            other => Err(format!("Unknown amount check `{other}`")),
        }
    }
}

/// A caller's claim that `donor` sent `amount_lamports` to `campaign`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferClaim {
    pub donor: Address,
    pub campaign: Address,
    pub amount_lamports: u64,
}

/// Verifies donation claims against transactions fetched from the ledger.
#[derive(Clone)]
pub struct TransferVerifier {
    ledger: Arc<dyn LedgerClient>,
    commitment: CommitmentLevel,
    amount_check: AmountCheck,
}

impl TransferVerifier {
    /// Verifier at `confirmed` commitment that ignores amounts.
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self {
            ledger,
            commitment: CommitmentLevel::Confirmed,
            amount_check: AmountCheck::Ignore,
        }
    }

    pub fn with_commitment(mut self, commitment: CommitmentLevel) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_amount_check(mut self, amount_check: AmountCheck) -> Self {
        self.amount_check = amount_check;
        self
    }

    /// Check `claim` against transaction `tx_id`.
    ///
    /// `Ok(false)` means the transaction exists and succeeded but carries no
    /// qualifying transfer. A missing transaction is `NotFound`, a failed one
    /// `Execution`. Cancelling `cancel` abandons the in-flight RPC call.
    pub async fn verify_transfer(
        &self,
        tx_id: &TransactionId,
        claim: &TransferClaim,
        cancel: &CancellationToken,
    ) -> Result<bool, ServiceError> {
        let record = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(%tx_id, "Transfer verification cancelled");
                return Err(ServiceError::Cancelled);
            }
            result = self.ledger.get_transaction(tx_id, self.commitment) => {
                result.map_err(|e| {
                    tracing::warn!(%tx_id, error = %e, "Failed to fetch transaction");
                    ServiceError::from(e)
                })?
            }
        };

        let record = record
            .ok_or_else(|| ServiceError::not_found(format!("Transaction {tx_id} not found")))?;

        if let Some(err) = &record.error {
            return Err(ServiceError::Execution(format!(
                "Transaction {tx_id} failed on-chain: {err}"
            )));
        }

        let valid = transfer_matches(&record, claim, self.amount_check);
        tracing::info!(
            %tx_id,
            donor = %claim.donor,
            campaign = %claim.campaign,
            valid,
            "Transfer verified"
        );
        Ok(valid)
    }
}

/// Whether any System Program instruction in `record` moves funds from the
/// claimed donor to the claimed campaign under `amount_check`.
pub fn transfer_matches(
    record: &TransactionRecord,
    claim: &TransferClaim,
    amount_check: AmountCheck,
) -> bool {
    record
        .instructions
        .iter()
        .filter(|ix| record.program_id(ix) == Some(&SYSTEM_PROGRAM_ID))
        .any(|ix| {
            let from = ix.accounts.first().and_then(|&i| record.account(i));
            let to = ix.accounts.get(1).and_then(|&i| record.account(i));

            from == Some(&claim.donor)
                && to == Some(&claim.campaign)
                && amount_satisfies(ix, claim.amount_lamports, amount_check)
        })
}

fn amount_satisfies(ix: &CompiledInstruction, claimed: u64, amount_check: AmountCheck) -> bool {
    match amount_check {
        AmountCheck::Ignore => true,
        AmountCheck::AtLeast => transfer_lamports(&ix.data).is_some_and(|sent| sent >= claimed),
        AmountCheck::Exact => transfer_lamports(&ix.data) == Some(claimed),
    }
}

/// Lamports moved by a System `Transfer` instruction, `None` for any other
/// System instruction.
fn transfer_lamports(data: &[u8]) -> Option<u64> {
    let tag: [u8; 4] = data.get(..4)?.try_into().ok()?;
    if u32::from_le_bytes(tag) != SYSTEM_TRANSFER_TAG || data.len() != 12 {
        return None;
    }
    let lamports: [u8; 8] = data.get(4..12)?.try_into().ok()?;
    Some(u64::from_le_bytes(lamports))
}
