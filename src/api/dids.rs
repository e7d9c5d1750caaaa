// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DID management API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    extract::{ApiJson, ApiPath},
    models::{CreateDidRequest, Did, UpdateDidRequest},
    state::AppState,
    storage::DidRepository,
};

#[utoipa::path(
    get,
    path = "/dids",
    tag = "DIDs",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All DIDs", body = [Did]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_dids(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Did>>, ApiError> {
    Ok(Json(DidRepository::new(state.store()).list()?))
}

#[utoipa::path(
    post,
    path = "/dids",
    tag = "DIDs",
    security(("bearer_auth" = [])),
    request_body = CreateDidRequest,
    responses(
        (status = 201, description = "DID created", body = Did),
        (status = 400, description = "Invalid body or duplicate identifier"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_did(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDidRequest>,
) -> Result<(StatusCode, Json<Did>), ApiError> {
    let did = DidRepository::new(state.store()).create(request)?;

    tracing::info!(did = %did.id, actor = actor.user_id, "DID created");
    Ok((StatusCode::CREATED, Json(did)))
}

#[utoipa::path(
    get,
    path = "/dids/{id}",
    tag = "DIDs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DID identifier")),
    responses(
        (status = 200, description = "DID found", body = Did),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "DID not found")
    )
)]
pub async fn get_did(
    Auth(_user): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Did>, ApiError> {
    Ok(Json(DidRepository::new(state.store()).get(&id)?))
}

#[utoipa::path(
    put,
    path = "/dids/{id}",
    tag = "DIDs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DID identifier")),
    request_body = UpdateDidRequest,
    responses(
        (status = 200, description = "DID updated", body = Did),
        (status = 400, description = "Invalid body"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "DID not found")
    )
)]
pub async fn update_did(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateDidRequest>,
) -> Result<Json<Did>, ApiError> {
    let did = DidRepository::new(state.store()).update(&id, request)?;

    tracing::info!(did = %id, actor = actor.user_id, "DID updated");
    Ok(Json(did))
}

/// Delete a DID. Resources that referenced it are kept with `did_id` cleared.
#[utoipa::path(
    delete,
    path = "/dids/{id}",
    tag = "DIDs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "DID identifier")),
    responses(
        (status = 204, description = "DID deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "DID not found")
    )
)]
pub async fn delete_did(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    DidRepository::new(state.store()).delete(&id)?;

    tracing::info!(did = %id, actor = actor.user_id, "DID deleted");
    Ok(StatusCode::NO_CONTENT)
}
