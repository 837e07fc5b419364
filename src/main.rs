// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{fs::OpenOptions, net::SocketAddr, process, sync::Arc, time::Duration};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use near_relay::api::router;
use near_relay::blockchain::{signing::Ed25519Signer, NearAccount, NearRpcClient};
use near_relay::config::{Config, LogFormat};
use near_relay::state::AppState;

/// Bound on every outbound RPC call. A timeout is a transport fault.
const RPC_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            process::exit(1);
        }
    };

    init_tracing(&config);

    let signer = match Ed25519Signer::from_encoded_key(&config.private_key) {
        Ok(signer) => signer,
        Err(e) => {
            tracing::error!("invalid signing key: {e}");
            process::exit(1);
        }
    };

    let rpc = match NearRpcClient::new(config.rpc_url.clone(), RPC_TIMEOUT) {
        Ok(rpc) => rpc,
        Err(e) => {
            tracing::error!("failed to build rpc client: {e}");
            process::exit(1);
        }
    };

    let account = NearAccount::new(rpc, config.account_id.clone(), signer);

    // The account handle must be live before any request is served.
    if let Err(e) = account.startup().await {
        tracing::error!("chain account startup failed: {e}");
        process::exit(1);
    }

    let state = AppState::new(Arc::new(account), config.api_secret.clone());
    let app = router(state);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("invalid bind address: {e}");
            process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            process::exit(1);
        }
    };

    tracing::info!("NEAR relay listening on http://{addr} (docs at /docs)");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {e}");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown signal received");
    }
}

/// Stdout layer per `LOG_FORMAT`, plus an append-only file layer mirroring
/// the informational log. The file is not part of the functional contract;
/// the service still starts when it cannot be opened.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));

    let stdout_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    let file_layer = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
    {
        Ok(file) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .boxed(),
        ),
        Err(e) => {
            eprintln!(
                "could not open log file {}: {e}",
                config.log_file.display()
            );
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}
