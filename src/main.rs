// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{net::SocketAddr, sync::Arc};

use aidly_wallet_gateway::{
    api::router,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    ledger::SolanaRpcClient,
    state::AppState,
};
use axum_server::{tls_rustls::RustlsConfig, Handle};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::from_env().expect("Invalid configuration");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }

    let ledger = SolanaRpcClient::new(&config.rpc_url, config.rpc_timeout)
        .expect("Failed to build Solana RPC client");

    let shutdown = CancellationToken::new();
    let mut state = AppState::new(Arc::new(ledger), &config).with_shutdown(shutdown.clone());

    if let Some(source) = &config.authority {
        let keypair = source.load().expect("Failed to load authority keypair");
        tracing::info!(authority = %keypair.pubkey(), "Loaded authority keypair");
        state = state.with_authority(keypair);
    }

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone(), shutdown));

    tracing::info!(
        network = config.network.name,
        rpc_url = %config.rpc_url,
        commitment = %config.commitment,
        "Aidly wallet gateway listening on {addr} (docs at /docs)"
    );

    match &config.tls {
        Some(tls) => {
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key)
                .await
                .expect("Failed to load TLS certificate");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("HTTPS server failed");
        }
        None => {
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
                .expect("HTTP server failed");
        }
    }

    tracing::info!("Server stopped");
}

/// Wait for Ctrl-C, then cancel in-flight verifications and drain connections.
async fn shutdown_signal(handle: Handle<SocketAddr>, shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
    handle.graceful_shutdown(Some(std::time::Duration::from_secs(10)));
}
