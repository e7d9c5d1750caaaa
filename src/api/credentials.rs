// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.
//!
//! Both routes are public. Login failures return the same body whether the
//! email is unknown or the password is wrong.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{
        password::{burn_verification, hash_password, verify_password},
        AuthError,
    },
    error::ApiError,
    extract::ApiJson,
    models::{LoginRequest, LoginResponse, RegisterRequest, User},
    state::AppState,
    storage::UserRepository,
};

/// Register a new account.
///
/// Returns the created user row, password hash included.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid body or email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let password_hash = hash_password(&request.password)?;
    let user = UserRepository::new(state.store()).create(request.into(), password_hash)?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange email and password for a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid credentials", body = crate::auth::error::AuthErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let user = UserRepository::new(state.store())
        .find_by_email(&request.email)
        .map_err(|e| AuthError::InternalError(format!("user lookup failed: {e}")))?;

    let user = match user {
        Some(user) if verify_password(&request.password, &user.password) => user,
        Some(user) => {
            tracing::info!(user_id = user.id, "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        None => {
            burn_verification(&request.password);
            tracing::info!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        }
    };

    let token = state.tokens().issue(user.id, &user.email)?;
    tracing::info!(user_id = user.id, "Token issued");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens().ttl_secs(),
    }))
}
