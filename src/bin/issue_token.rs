// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Print a bearer token for a user id and email, signed with the configured
//! secret.
//!
//! Usage: `issue-token <user_id> <email>`

use std::process::ExitCode;

use did_registry_server::{
    auth::TokenIssuer,
    config::{AppConfig, JwtSecret},
    telemetry::init_tracing,
};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (user_id, email) = match args.as_slice() {
        [user_id, email] => match user_id.parse::<u64>() {
            Ok(user_id) => (user_id, email.as_str()),
            Err(_) => {
                eprintln!("user_id must be a positive integer, got {user_id:?}");
                return ExitCode::from(2);
            }
        },
        _ => {
            eprintln!("Usage: issue-token <user_id> <email>");
            return ExitCode::from(2);
        }
    };

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    if config.jwt_secret == JwtSecret::Generated {
        eprintln!("warning: JWT_SECRET is not set; the running server will reject this token");
    }

    let token = TokenIssuer::from_config(&config.jwt_secret)
        .and_then(|issuer| issuer.issue(user_id, email));
    match token {
        Ok(token) => {
            println!("{token}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to issue token: {e}");
            ExitCode::FAILURE
        }
    }
}
