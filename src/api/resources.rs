// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource management API endpoints.
//!
//! A resource may point at a DID through `did_id`; the DID must exist when
//! the reference is written.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    extract::{ApiJson, ApiPath},
    models::{CreateResourceRequest, Resource, UpdateResourceRequest},
    state::AppState,
    storage::ResourceRepository,
};

#[utoipa::path(
    get,
    path = "/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All resources", body = [Resource]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_resources(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Resource>>, ApiError> {
    Ok(Json(ResourceRepository::new(state.store()).list()?))
}

#[utoipa::path(
    post,
    path = "/resources",
    tag = "Resources",
    security(("bearer_auth" = [])),
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = Resource),
        (status = 400, description = "Invalid body, duplicate identifier or unknown DID"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_resource(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let resource = ResourceRepository::new(state.store()).create(request)?;

    tracing::info!(
        resource = %resource.id,
        did = resource.did_id.as_deref().unwrap_or("-"),
        actor = actor.user_id,
        "Resource created"
    );
    Ok((StatusCode::CREATED, Json(resource)))
}

#[utoipa::path(
    get,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 200, description = "Resource found", body = Resource),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn get_resource(
    Auth(_user): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Resource>, ApiError> {
    Ok(Json(ResourceRepository::new(state.store()).get(&id)?))
}

#[utoipa::path(
    put,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource identifier")),
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = Resource),
        (status = 400, description = "Invalid body or unknown DID"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn update_resource(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<UpdateResourceRequest>,
) -> Result<Json<Resource>, ApiError> {
    let resource = ResourceRepository::new(state.store()).update(&id, request)?;

    tracing::info!(resource = %id, actor = actor.user_id, "Resource updated");
    Ok(Json(resource))
}

#[utoipa::path(
    delete,
    path = "/resources/{id}",
    tag = "Resources",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Resource identifier")),
    responses(
        (status = 204, description = "Resource deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Resource not found")
    )
)]
pub async fn delete_resource(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<StatusCode, ApiError> {
    ResourceRepository::new(state.store()).delete(&id)?;

    tracing::info!(resource = %id, actor = actor.user_id, "Resource deleted");
    Ok(StatusCode::NO_CONTENT)
}
