// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User management API endpoints.
//!
//! All operations require a bearer token. Plaintext passwords in create and
//! update bodies are hashed before they reach storage.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{password::hash_password, Auth},
    error::ApiError,
    extract::{ApiJson, ApiPath},
    models::{CreateUserRequest, UpdateUserRequest, User},
    state::AppState,
    storage::UserRepository,
};

/// List every user.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_users(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = UserRepository::new(state.store()).list()?;
    Ok(Json(users))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid body or duplicate email"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_user(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let password_hash = hash_password(&request.password)?;
    let user = UserRepository::new(state.store()).create(request, password_hash)?;

    tracing::info!(user_id = user.id, actor = actor.user_id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Auth(_user): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<User>, ApiError> {
    let user = UserRepository::new(state.store()).get(id)?;
    Ok(Json(user))
}

/// Update the fields present in the body.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid body or duplicate email"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let password_hash = request
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;
    let user = UserRepository::new(state.store()).update(id, request, password_hash)?;

    tracing::info!(user_id = id, actor = actor.user_id, "User updated");
    Ok(Json(user))
}

/// Delete a user. Their documents are kept with `user_id` cleared.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    UserRepository::new(state.store()).delete(id)?;

    tracing::info!(user_id = id, actor = actor.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
