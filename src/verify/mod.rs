// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Side-effect-free validators over untrusted input.
//!
//! - [`verify_signature`] checks a detached Ed25519 signature.
//! - [`TransferVerifier`] confirms a donation transfer on-chain.

pub mod signature;
pub mod transfer;

pub use signature::verify_signature;
pub use transfer::{transfer_matches, AmountCheck, TransferClaim, TransferVerifier};
