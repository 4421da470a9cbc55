// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{
        AccountInfoResponse, AirdropRequest, AirdropResponse, BalanceResponse, SolAmount,
        VerificationResult, VerifySignatureRequest, VerifyTransactionRequest,
    },
    state::AppState,
};

pub mod extract;
pub mod health;
pub mod verify;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/wallet/hello", get(wallet::hello))
        .route("/wallet/airdrop", post(wallet::airdrop))
        .route("/wallet/{address}/balance", get(wallet::get_balance))
        .route(
            "/wallet/{address}/account-info",
            get(wallet::get_account_info),
        )
        .route("/wallet/verify-signature", post(verify::verify_signature))
        .route(
            "/wallet/verify-transaction",
            post(verify::verify_transaction),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/v1", v1_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        wallet::hello,
        wallet::get_balance,
        wallet::get_account_info,
        wallet::airdrop,
        verify::verify_signature,
        verify::verify_transaction
    ),
    components(
        schemas(
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse,
            BalanceResponse,
            AccountInfoResponse,
            AirdropRequest,
            AirdropResponse,
            SolAmount,
            VerifySignatureRequest,
            VerifyTransactionRequest,
            VerificationResult
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Wallet", description = "Balance, account and airdrop utilities"),
        (name = "Verification", description = "Signature and donation transfer verification")
    )
)]
struct ApiDoc;
