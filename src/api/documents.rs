// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document management API endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    extract::{ApiJson, ApiPath},
    models::{CreateDocumentRequest, Document, UpdateDocumentRequest},
    state::AppState,
    storage::DocumentRepository,
};

#[utoipa::path(
    get,
    path = "/documents",
    tag = "Documents",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All documents", body = [Document]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_documents(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Document>>, ApiError> {
    Ok(Json(DocumentRepository::new(state.store()).list()?))
}

/// Create a document. `user_id`, when present, must name an existing user.
#[utoipa::path(
    post,
    path = "/documents",
    tag = "Documents",
    security(("bearer_auth" = [])),
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = Document),
        (status = 400, description = "Invalid body or unknown user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_document(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<Document>), ApiError> {
    let document = DocumentRepository::new(state.store()).create(request)?;

    tracing::info!(document_id = document.id, actor = actor.user_id, "Document created");
    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document found", body = Document),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn get_document(
    Auth(_user): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<Document>, ApiError> {
    Ok(Json(DocumentRepository::new(state.store()).get(id)?))
}

#[utoipa::path(
    put,
    path = "/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Document identifier")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 400, description = "Invalid body or unknown user"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn update_document(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<UpdateDocumentRequest>,
) -> Result<Json<Document>, ApiError> {
    let document = DocumentRepository::new(state.store()).update(id, request)?;

    tracing::info!(document_id = id, actor = actor.user_id, "Document updated");
    Ok(Json(document))
}

/// Delete a document. Its transactions are kept with `document_id` cleared.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    tag = "Documents",
    security(("bearer_auth" = [])),
    params(("id" = u64, Path, description = "Document identifier")),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Document not found")
    )
)]
pub async fn delete_document(
    Auth(actor): Auth,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    DocumentRepository::new(state.store()).delete(id)?;

    tracing::info!(document_id = id, actor = actor.user_id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}
