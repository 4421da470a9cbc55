// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Aidly Wallet Gateway - Solana wallet API for the donation platform
//!
//! This crate exposes wallet utilities over HTTP and answers two questions
//! for the platform: did this address sign this message, and did this
//! donor really send SOL to this campaign on-chain.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `config` - Environment configuration
//! - `ledger` - Solana RPC access, keypairs and ledger types
//! - `verify` - Ed25519 signature and transfer verification

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod state;
pub mod verify;
