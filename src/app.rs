// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Server startup: state construction, binding, and graceful shutdown.

use crate::{
    api::router,
    auth::{AuthError, TokenIssuer},
    config::AppConfig,
    state::AppState,
    storage::{Store, StoreError},
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open database: {0}")]
    Store(#[from] StoreError),

    #[error("failed to initialise token issuer: {0}")]
    Tokens(#[from] AuthError),

    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the database and build the token issuer described by `config`.
pub fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let store = Store::open(&config.database_path)?;
    let tokens = TokenIssuer::from_config(&config.jwt_secret)?;
    Ok(AppState::new(store, tokens))
}

/// Serve the API until Ctrl+C or SIGTERM.
pub async fn serve(config: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&config)?;
    let app = router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(
        address = %address,
        profile = %config.profile,
        database = %config.database_path.display(),
        "DID registry listening (docs at /docs)"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
