// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solana JSON-RPC client.
//!
//! Speaks JSON-RPC 2.0 over HTTP(S) with `reqwest`. Every call is bounded by
//! the client-wide timeout; nothing is retried here.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};

use super::client::{LedgerClient, LedgerError};
use super::types::*;

/// Default per-call timeout.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Ledger client backed by a Solana JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
    rpc_url: url::Url,
    http: reqwest::Client,
}

impl SolanaRpcClient {
    /// Create a client for the given endpoint.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, LedgerError> {
        let rpc_url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| LedgerError::InvalidRpcUrl(e.to_string()))?;

        if !matches!(rpc_url.scheme(), "http" | "https") {
            return Err(LedgerError::InvalidRpcUrl(format!(
                "unsupported scheme `{}`",
                rpc_url.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self { rpc_url, http })
    }

    /// Issue a single JSON-RPC call; `Ok(None)` when the node returns `null`.
    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: Value,
    ) -> Result<Option<T>, LedgerError> {
        tracing::debug!(method, "Sending RPC request");

        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(self.rpc_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "HTTP {} from RPC endpoint",
                response.status()
            )));
        }

        let envelope: RpcEnvelope<T> = response.json().await.map_err(|e| {
            if e.is_timeout() {
                LedgerError::Timeout
            } else {
                LedgerError::MalformedResponse(e.to_string())
            }
        })?;

        if let Some(error) = envelope.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        Ok(envelope.result)
    }
}

fn map_transport_error(e: reqwest::Error) -> LedgerError {
    if e.is_timeout() {
        LedgerError::Timeout
    } else {
        LedgerError::Transport(e.to_string())
    }
}

fn missing_result(method: &str) -> LedgerError {
    LedgerError::MalformedResponse(format!("`{method}` returned no result"))
}

#[async_trait]
impl LedgerClient for SolanaRpcClient {
    async fn get_transaction(
        &self,
        id: &TransactionId,
        commitment: CommitmentLevel,
    ) -> Result<Option<TransactionRecord>, LedgerError> {
        let params = json!([
            id.as_str(),
            {
                "encoding": "json",
                "commitment": commitment,
                "maxSupportedTransactionVersion": 0,
            }
        ]);

        self.call::<TransactionWire>("getTransaction", params)
            .await?
            .map(TransactionWire::into_record)
            .transpose()
    }

    async fn get_balance(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<u64, LedgerError> {
        let params = json!([address.to_string(), { "commitment": commitment }]);

        self.call::<WithContext<u64>>("getBalance", params)
            .await?
            .map(|r| r.value)
            .ok_or_else(|| missing_result("getBalance"))
    }

    async fn get_account_info(
        &self,
        address: &Address,
        commitment: CommitmentLevel,
    ) -> Result<Option<AccountInfo>, LedgerError> {
        let params = json!([
            address.to_string(),
            { "encoding": "base64", "commitment": commitment }
        ]);

        self.call::<WithContext<Option<AccountWire>>>("getAccountInfo", params)
            .await?
            .ok_or_else(|| missing_result("getAccountInfo"))?
            .value
            .map(AccountWire::into_account)
            .transpose()
    }

    async fn request_airdrop(
        &self,
        address: &Address,
        lamports: u64,
    ) -> Result<TransactionId, LedgerError> {
        let params = json!([address.to_string(), lamports]);

        let signature = self
            .call::<String>("requestAirdrop", params)
            .await?
            .ok_or_else(|| missing_result("requestAirdrop"))?;

        TransactionId::new(signature)
            .map_err(|_| LedgerError::MalformedResponse("empty airdrop signature".to_string()))
    }

    async fn health(&self) -> Result<(), LedgerError> {
        match self.call::<String>("getHealth", json!([])).await? {
            Some(status) if status == "ok" => Ok(()),
            Some(status) => Err(LedgerError::MalformedResponse(format!(
                "unexpected health status `{status}`"
            ))),
            None => Err(missing_result("getHealth")),
        }
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    slot: u64,
    block_time: Option<i64>,
    meta: Option<MetaWire>,
    transaction: EncodedTransactionWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaWire {
    err: Option<Value>,
    fee: u64,
    #[serde(default)]
    loaded_addresses: Option<LoadedAddressesWire>,
}

#[derive(Debug, Default, Deserialize)]
struct LoadedAddressesWire {
    #[serde(default)]
    writable: Vec<String>,
    #[serde(default)]
    readonly: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EncodedTransactionWire {
    message: MessageWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageWire {
    account_keys: Vec<String>,
    instructions: Vec<InstructionWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstructionWire {
    program_id_index: u8,
    accounts: Vec<u8>,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountWire {
    lamports: u64,
    owner: String,
    /// `[payload, encoding]`
    data: (String, String),
    executable: bool,
    rent_epoch: u64,
}

fn parse_wire_address(raw: &str) -> Result<Address, LedgerError> {
    raw.parse()
        .map_err(|e: ParseAddressError| LedgerError::MalformedResponse(e.to_string()))
}

impl TransactionWire {
    fn into_record(self) -> Result<TransactionRecord, LedgerError> {
        let meta = self.meta.ok_or_else(|| {
            LedgerError::MalformedResponse("transaction status metadata missing".to_string())
        })?;
        let loaded = meta.loaded_addresses.unwrap_or_default();

        let account_keys = self
            .transaction
            .message
            .account_keys
            .iter()
            .chain(loaded.writable.iter())
            .chain(loaded.readonly.iter())
            .map(|key| parse_wire_address(key))
            .collect::<Result<Vec<_>, _>>()?;

        let instructions = self
            .transaction
            .message
            .instructions
            .into_iter()
            .map(|ix| {
                let data = bs58::decode(&ix.data).into_vec().map_err(|e| {
                    LedgerError::MalformedResponse(format!("instruction data: {e}"))
                })?;
                Ok(CompiledInstruction {
                    program_id_index: ix.program_id_index,
                    accounts: ix.accounts,
                    data,
                })
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        Ok(TransactionRecord {
            slot: self.slot,
            block_time: self.block_time,
            fee: meta.fee,
            error: meta.err.map(|e| e.to_string()),
            account_keys,
            instructions,
        })
    }
}

impl AccountWire {
    fn into_account(self) -> Result<AccountInfo, LedgerError> {
        let (payload, encoding) = self.data;
        if encoding != "base64" {
            return Err(LedgerError::MalformedResponse(format!(
                "unexpected account data encoding `{encoding}`"
            )));
        }
        let data = BASE64
            .decode(payload)
            .map_err(|e| LedgerError::MalformedResponse(format!("account data: {e}")))?;

        Ok(AccountInfo {
            lamports: self.lamports,
            owner: parse_wire_address(&self.owner)?,
            executable: self.executable,
            rent_epoch: self.rent_epoch,
            data,
        })
    }
}
