// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet query and airdrop endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use super::extract::ValidatedJson;
use crate::{
    error::{ApiError, ServiceError},
    ledger::{format_sol, Address, LAMPORTS_PER_SOL},
    models::{
        AccountInfoResponse, AirdropRequest, AirdropResponse, ApiResponse, BalanceResponse,
        HelloQuery,
    },
    state::AppState,
};

/// Greet the caller by name.
#[utoipa::path(
    get,
    path = "/v1/wallet/hello",
    tag = "Wallet",
    params(HelloQuery),
    responses(
        (status = 200, description = "Greeting", body = ApiResponse<String>),
        (status = 400, description = "Name missing")
    )
)]
pub async fn hello(Query(query): Query<HelloQuery>) -> Result<Json<ApiResponse<String>>, ApiError> {
    let name = query
        .name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Name parameter is required."))?;

    Ok(Json(ApiResponse::ok("Hello Success", format!("Hello {name}"))))
}

/// Get the native SOL balance of an address.
#[utoipa::path(
    get,
    path = "/v1/wallet/{address}/balance",
    tag = "Wallet",
    params(("address" = String, Path, description = "Base58 wallet address")),
    responses(
        (status = 200, description = "Balance fetched successfully", body = ApiResponse<BalanceResponse>),
        (status = 400, description = "Malformed address"),
        (status = 500, description = "RPC node unavailable")
    )
)]
pub async fn get_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<BalanceResponse>>, ApiError> {
    let address = Address::parse(&address)?;

    let lamports = state
        .ledger
        .get_balance(&address, state.commitment)
        .await
        .map_err(|e| {
            tracing::warn!(%address, error = %e, "Failed to query balance");
            ServiceError::from(e)
        })?;

    Ok(Json(ApiResponse::ok(
        "Balance fetched successfully",
        BalanceResponse {
            address: address.to_string(),
            network: state.network_name.clone(),
            lamports,
            sol: format_sol(lamports),
        },
    )))
}

/// Get the on-chain account state of an address.
#[utoipa::path(
    get,
    path = "/v1/wallet/{address}/account-info",
    tag = "Wallet",
    params(("address" = String, Path, description = "Base58 account address")),
    responses(
        (status = 200, description = "Account information fetched successfully", body = ApiResponse<AccountInfoResponse>),
        (status = 400, description = "Malformed address"),
        (status = 404, description = "Account does not exist"),
        (status = 500, description = "RPC node unavailable")
    )
)]
pub async fn get_account_info(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ApiResponse<AccountInfoResponse>>, ApiError> {
    let address = Address::parse(&address)?;

    let account = state
        .ledger
        .get_account_info(&address, state.commitment)
        .await
        .map_err(|e| {
            tracing::warn!(%address, error = %e, "Failed to query account info");
            ServiceError::from(e)
        })?
        .ok_or_else(|| ApiError::not_found(format!("Account {address} not found")))?;

    Ok(Json(ApiResponse::ok(
        "Account information fetched successfully",
        AccountInfoResponse {
            address: address.to_string(),
            lamports: account.lamports,
            owner: account.owner.to_string(),
            executable: account.executable,
            rent_epoch: account.rent_epoch,
            space: account.data.len(),
            data: BASE64.encode(&account.data),
        },
    )))
}

/// Request an airdrop of test SOL (devnet / testnet only).
#[utoipa::path(
    post,
    path = "/v1/wallet/airdrop",
    tag = "Wallet",
    request_body = AirdropRequest,
    responses(
        (status = 200, description = "Airdrop requested", body = ApiResponse<AirdropResponse>),
        (status = 400, description = "Malformed address or amount"),
        (status = 500, description = "Airdrop rejected by the RPC node")
    )
)]
pub async fn airdrop(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AirdropRequest>,
) -> Result<Json<ApiResponse<AirdropResponse>>, ApiError> {
    if request.wallet_address.trim().is_empty() {
        return Err(ApiError::bad_request("Wallet address is required."));
    }
    let address = Address::parse(&request.wallet_address)?;

    let lamports = match &request.sol_amount {
        Some(amount) => amount.to_lamports()?,
        None => 0,
    };
    let lamports = if lamports == 0 { LAMPORTS_PER_SOL } else { lamports };

    let tx_id = state
        .ledger
        .request_airdrop(&address, lamports)
        .await
        .map_err(|e| {
            tracing::warn!(%address, lamports, error = %e, "Airdrop failed");
            ServiceError::from(e)
        })?;

    tracing::info!(%address, lamports, %tx_id, "Airdrop requested");

    Ok(Json(ApiResponse::ok(
        "Airdrop requested successfully",
        AirdropResponse {
            tx_id: tx_id.to_string(),
            address: address.to_string(),
            lamports,
        },
    )))
}
