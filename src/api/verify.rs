// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signature and donation-transfer verification endpoints.

use axum::{extract::State, Json};

use super::extract::ValidatedJson;
use crate::{
    error::{ApiError, ServiceError},
    ledger::{Address, TransactionId},
    models::{ApiResponse, VerificationResult, VerifySignatureRequest, VerifyTransactionRequest},
    state::AppState,
    verify::{verify_signature as verify_detached, TransferClaim},
};

/// Verify a detached Ed25519 signature over a message.
#[utoipa::path(
    post,
    path = "/v1/wallet/verify-signature",
    tag = "Verification",
    request_body = VerifySignatureRequest,
    responses(
        (status = 200, description = "Verification result", body = ApiResponse<VerificationResult>),
        (status = 400, description = "Missing or malformed input")
    )
)]
pub async fn verify_signature(
    ValidatedJson(request): ValidatedJson<VerifySignatureRequest>,
) -> Result<Json<ApiResponse<VerificationResult>>, ApiError> {
    let valid = verify_detached(&request.public_key, &request.message, &request.signature)?;

    Ok(Json(ApiResponse::ok(
        "Signature verification result",
        VerificationResult { valid },
    )))
}

/// Verify that a donation transfer from donor to campaign happened on-chain.
#[utoipa::path(
    post,
    path = "/v1/wallet/verify-transaction",
    tag = "Verification",
    request_body = VerifyTransactionRequest,
    responses(
        (status = 200, description = "Verification result", body = ApiResponse<VerificationResult>),
        (status = 400, description = "Missing or malformed input"),
        (status = 404, description = "Transaction not found"),
        (status = 408, description = "Verification cancelled or timed out"),
        (status = 422, description = "Transaction failed on-chain"),
        (status = 500, description = "RPC node unavailable")
    )
)]
pub async fn verify_transaction(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyTransactionRequest>,
) -> Result<Json<ApiResponse<VerificationResult>>, ApiError> {
    let amount = match &request.claimed_amount {
        Some(amount)
            if !request.tx_id.trim().is_empty()
                && !request.donor_address.trim().is_empty()
                && !request.campaign_address.trim().is_empty() =>
        {
            amount
        }
        _ => {
            return Err(ApiError::bad_request(
                "tx_id, donor_address, campaign_address, and claimed_amount are required.",
            ))
        }
    };

    let tx_id = TransactionId::new(request.tx_id.as_str())?;
    let claim = TransferClaim {
        donor: Address::parse(&request.donor_address)?,
        campaign: Address::parse(&request.campaign_address)?,
        amount_lamports: amount.to_lamports()?,
    };

    let cancel = state.shutdown.child_token();
    let verification = state.transfers.verify_transfer(&tx_id, &claim, &cancel);

    let valid = match tokio::time::timeout(state.verify_timeout, verification).await {
        Ok(result) => result?,
        Err(_) => {
            tracing::warn!(
                %tx_id,
                timeout_secs = state.verify_timeout.as_secs(),
                "Transfer verification deadline exceeded"
            );
            return Err(ServiceError::Cancelled.into());
        }
    };

    Ok(Json(ApiResponse::ok(
        "Transaction verification result",
        VerificationResult { valid },
    )))
}
