// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{
    config::AppConfig,
    ledger::{Address, CommitmentLevel, Keypair, LedgerClient},
    verify::TransferVerifier,
};

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerClient>,
    pub transfers: TransferVerifier,
    pub commitment: CommitmentLevel,
    pub verify_timeout: Duration,
    pub network_name: String,
    /// Signer used by minting flows; only its presence is exposed.
    pub authority: Option<Arc<Keypair>>,
    /// Cancelled on server shutdown; in-flight verifications observe it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(ledger: Arc<dyn LedgerClient>, config: &AppConfig) -> Self {
        let transfers = TransferVerifier::new(ledger.clone())
            .with_commitment(config.commitment)
            .with_amount_check(config.amount_check);

        Self {
            ledger,
            transfers,
            commitment: config.commitment,
            verify_timeout: config.verify_timeout,
            network_name: config.network.name.to_string(),
            authority: None,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_authority(mut self, keypair: Keypair) -> Self {
        self.authority = Some(Arc::new(keypair));
        self
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn authority_pubkey(&self) -> Option<Address> {
        self.authority.as_ref().map(|k| k.pubkey())
    }
}
