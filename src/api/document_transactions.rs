// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document transaction API endpoints.
//!
//! These routes are public: no bearer token is required. `user_id` on a
//! transaction is recorded as given and is not checked against the users
//! table.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::ApiError,
    extract::{ApiJson, ApiPath},
    models::{
        CreateDocumentTransactionRequest, DocumentTransaction, UpdateDocumentTransactionRequest,
    },
    state::AppState,
    storage::DocumentTransactionRepository,
};

#[utoipa::path(
    get,
    path = "/documenttransactions",
    tag = "Document Transactions",
    responses((status = 200, description = "All document transactions", body = [DocumentTransaction]))
)]
pub async fn list_document_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentTransaction>>, ApiError> {
    Ok(Json(DocumentTransactionRepository::new(state.store()).list()?))
}

#[utoipa::path(
    post,
    path = "/documenttransactions",
    tag = "Document Transactions",
    request_body = CreateDocumentTransactionRequest,
    responses(
        (status = 201, description = "Transaction recorded", body = DocumentTransaction),
        (status = 400, description = "Invalid body or unknown document")
    )
)]
pub async fn create_document_transaction(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDocumentTransactionRequest>,
) -> Result<(StatusCode, Json<DocumentTransaction>), ApiError> {
    let transaction = DocumentTransactionRepository::new(state.store()).create(request)?;

    tracing::info!(
        transaction_id = transaction.id,
        document_id = ?transaction.document_id,
        "Document transaction recorded"
    );
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/documenttransactions/{id}",
    tag = "Document Transactions",
    params(("id" = u64, Path, description = "Transaction identifier")),
    responses(
        (status = 200, description = "Transaction found", body = DocumentTransaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_document_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<DocumentTransaction>, ApiError> {
    Ok(Json(DocumentTransactionRepository::new(state.store()).get(id)?))
}

#[utoipa::path(
    put,
    path = "/documenttransactions/{id}",
    tag = "Document Transactions",
    params(("id" = u64, Path, description = "Transaction identifier")),
    request_body = UpdateDocumentTransactionRequest,
    responses(
        (status = 200, description = "Transaction updated", body = DocumentTransaction),
        (status = 400, description = "Invalid body or unknown document"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn update_document_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<UpdateDocumentTransactionRequest>,
) -> Result<Json<DocumentTransaction>, ApiError> {
    let transaction = DocumentTransactionRepository::new(state.store()).update(id, request)?;

    tracing::info!(transaction_id = id, "Document transaction updated");
    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/documenttransactions/{id}",
    tag = "Document Transactions",
    params(("id" = u64, Path, description = "Transaction identifier")),
    responses(
        (status = 204, description = "Transaction deleted"),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn delete_document_transaction(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    DocumentTransactionRepository::new(state.store()).delete(id)?;

    tracing::info!(transaction_id = id, "Document transaction deleted");
    Ok(StatusCode::NO_CONTENT)
}
