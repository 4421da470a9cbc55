// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Upper bound for the RPC node health probe.
const RPC_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall health status ("ok" or "degraded").
    pub status: String,
    /// Solana network the gateway talks to.
    pub network: String,
    /// Individual health checks and their results.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// RPC node status ("ok" or "unavailable").
    pub rpc: String,
    /// Authority signer address, if one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Check whether the RPC node answers and reports itself healthy.
async fn check_rpc(state: &AppState) -> String {
    match tokio::time::timeout(RPC_PROBE_TIMEOUT, state.ledger.health()).await {
        Ok(Ok(())) => "ok".to_string(),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "RPC node health check failed");
            "unavailable".to_string()
        }
        Err(_) => {
            tracing::warn!("RPC node health check timed out");
            "unavailable".to_string()
        }
    }
}

/// Health check endpoint handler.
///
/// Returns 200 if all checks pass, 503 if any check fails.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = ReadyResponse),
        (status = 503, description = "Service is unhealthy", body = ReadyResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let rpc = check_rpc(&state).await;
    let all_ok = rpc == "ok";

    let response = ReadyResponse {
        status: if all_ok { "ok" } else { "degraded" }.to_string(),
        network: state.network_name.clone(),
        checks: HealthChecks {
            service: "ok".to_string(),
            rpc,
            authority: state.authority_pubkey().map(|pubkey| pubkey.to_string()),
        },
    };

    let status = if all_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// Returns 200 only if the RPC node is reachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(state: State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    health(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        ledger::{
            testing::{Fault, InMemoryLedger},
            Keypair,
        },
    };
    use ed25519_dalek::SigningKey;
    use std::sync::Arc;

    #[tokio::test]
    async fn healthy_node_reports_ok() {
        let state = AppState::new(Arc::new(InMemoryLedger::new()), &AppConfig::default());
        let (status, Json(body)) = health(State(state)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
        assert_eq!(body.network, "devnet");
        assert!(body.checks.authority.is_none());
    }

    #[tokio::test]
    async fn failing_node_degrades_readiness() {
        let ledger = InMemoryLedger::new().with_fault(Fault::RpcError);
        let state = AppState::new(Arc::new(ledger), &AppConfig::default());
        let (status, Json(body)) = readiness(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "degraded");
        assert_eq!(body.checks.rpc, "unavailable");
    }

    #[tokio::test]
    async fn configured_authority_is_reported() {
        let keypair = Keypair::from(SigningKey::from_bytes(&[5u8; 32]));
        let expected = keypair.pubkey().to_string();
        let state = AppState::new(Arc::new(InMemoryLedger::new()), &AppConfig::default())
            .with_authority(keypair);

        let (_, Json(body)) = health(State(state)).await;
        assert_eq!(body.checks.authority, Some(expected));
    }

    #[tokio::test]
    async fn liveness_is_always_ok() {
        assert_eq!(liveness().await.status, "ok");
    }
}
