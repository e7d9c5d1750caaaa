// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Drop and recreate every table in the configured database.
//!
//! Usage: `db-sync --force`

use std::process::ExitCode;

use did_registry_server::{config::AppConfig, storage::Store, telemetry::init_tracing};

fn main() -> ExitCode {
    let force = std::env::args().skip(1).any(|arg| arg == "--force");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    if !force {
        eprintln!(
            "Refusing to wipe {} without --force",
            config.database_path.display()
        );
        return ExitCode::from(2);
    }

    let result = Store::open(&config.database_path).and_then(|store| store.reset());
    match result {
        Ok(()) => {
            tracing::info!(
                profile = %config.profile,
                database = %config.database_path.display(),
                "Database schema recreated"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Database reset failed");
            ExitCode::FAILURE
        }
    }
}
