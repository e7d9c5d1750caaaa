// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware::from_fn_with_state, routing::get, routing::post, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{error::AuthErrorBody, require_auth},
    error::ErrorBody,
    models::{
        CreateDidRequest, CreateDocumentRequest, CreateDocumentTransactionRequest,
        CreateResourceRequest, CreateUserRequest, Did, Document, DocumentTransaction,
        LoginRequest, LoginResponse, RegisterRequest, Resource, UpdateDidRequest,
        UpdateDocumentRequest, UpdateDocumentTransactionRequest, UpdateResourceRequest,
        UpdateUserRequest, User,
    },
    state::AppState,
};

pub mod credentials;
pub mod dids;
pub mod document_transactions;
pub mod documents;
pub mod health;
pub mod resources;
pub mod users;

pub fn router(state: AppState) -> Router {
    // Everything here requires a bearer token.
    let protected = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/resources",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route(
            "/resources/{id}",
            get(resources::get_resource)
                .put(resources::update_resource)
                .delete(resources::delete_resource),
        )
        .route("/dids", get(dids::list_dids).post(dids::create_did))
        .route(
            "/dids/{id}",
            get(dids::get_did)
                .put(dids::update_did)
                .delete(dids::delete_did),
        )
        .route(
            "/documents",
            get(documents::list_documents).post(documents::create_document),
        )
        .route(
            "/documents/{id}",
            get(documents::get_document)
                .put(documents::update_document)
                .delete(documents::delete_document),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let public = Router::new()
        .route(
            "/documenttransactions",
            get(document_transactions::list_document_transactions)
                .post(document_transactions::create_document_transaction),
        )
        .route(
            "/documenttransactions/{id}",
            get(document_transactions::get_document_transaction)
                .put(document_transactions::update_document_transaction)
                .delete(document_transactions::delete_document_transaction),
        )
        .route("/register", post(credentials::register))
        .route("/login", post(credentials::login))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    Router::new()
        .merge(protected)
        .merge(public)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(CorsLayer::permissive())
}

/// Registers the `bearer_auth` scheme referenced by protected operations.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        resources::list_resources,
        resources::create_resource,
        resources::get_resource,
        resources::update_resource,
        resources::delete_resource,
        dids::list_dids,
        dids::create_did,
        dids::get_did,
        dids::update_did,
        dids::delete_did,
        documents::list_documents,
        documents::create_document,
        documents::get_document,
        documents::update_document,
        documents::delete_document,
        document_transactions::list_document_transactions,
        document_transactions::create_document_transaction,
        document_transactions::get_document_transaction,
        document_transactions::update_document_transaction,
        document_transactions::delete_document_transaction,
        credentials::register,
        credentials::login,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateUserRequest,
            Resource,
            CreateResourceRequest,
            UpdateResourceRequest,
            Did,
            CreateDidRequest,
            UpdateDidRequest,
            Document,
            CreateDocumentRequest,
            UpdateDocumentRequest,
            DocumentTransaction,
            CreateDocumentTransactionRequest,
            UpdateDocumentTransactionRequest,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ErrorBody,
            AuthErrorBody,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "User management"),
        (name = "Resources", description = "Resources attached to DIDs"),
        (name = "DIDs", description = "Decentralized identifier records"),
        (name = "Documents", description = "Documents owned by users"),
        (name = "Document Transactions", description = "Transactions recorded against documents"),
        (name = "Auth", description = "Registration and login"),
        (name = "Health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;
