// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures for the REST API. Persisted rows and
//! response bodies share one type per entity; every type derives
//! `Serialize`, `Deserialize`, and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! ## Entities
//!
//! - **User**: account holder; owns documents
//! - **DID**: decentralized identifier record; owns resources
//! - **Resource**: payload attached to a DID
//! - **Document**: content blob owned by a user
//! - **DocumentTransaction**: opaque transaction record attached to a document
//!
//! Update requests carry only optional fields. Fields left out of the body
//! keep their stored value; primary keys never change. Nullable columns use
//! `Option<Option<T>>`: absent keeps the value, `null` clears it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Deserialize a present field (including `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` so an absent field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// User Models
// =============================================================================

/// A registered user.
///
/// `password` always holds an argon2 PHC hash, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    /// Auto-increment identifier.
    pub id: u64,
    pub name: String,
    /// Unique (case-insensitive) email address.
    pub email: String,
    pub phone: Option<String>,
    pub pin: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// National identity document numbers.
    #[serde(default)]
    pub national_id_numbers: Vec<String>,
    /// Base64-encoded profile image.
    pub image: Option<String>,
    /// Salted password hash.
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// Plaintext password; hashed before it is stored.
    pub password: String,
    pub phone: Option<String>,
    pub pin: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub national_id_numbers: Vec<String>,
    pub image: Option<String>,
}

/// Partial update of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// New plaintext password; hashed before it is stored.
    pub password: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub pin: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<NaiveDate>, nullable)]
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub national_id_numbers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub image: Option<Option<String>>,
}

// =============================================================================
// Registration / Login Models
// =============================================================================

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for CreateUserRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: None,
            pin: None,
            date_of_birth: None,
            national_id_numbers: Vec::new(),
            image: None,
        }
    }
}

/// Request to exchange credentials for a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Signed JWT to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}

// =============================================================================
// DID Models
// =============================================================================

/// A decentralized identifier record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Did {
    /// Caller-supplied identifier (e.g. `did:example:123`).
    pub id: String,
    pub controller: Option<String>,
    /// Opaque DID document blob.
    pub document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a DID.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateDidRequest {
    pub id: String,
    pub controller: Option<String>,
    pub document: Option<String>,
}

/// Partial update of a DID.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDidRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub controller: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub document: Option<Option<String>>,
}

// =============================================================================
// Resource Models
// =============================================================================

/// A resource published under a DID.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Resource {
    /// Caller-supplied identifier.
    pub id: String,
    pub payload: Option<String>,
    /// Owning DID, if any.
    pub did_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a resource.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    pub id: String,
    pub payload: Option<String>,
    /// Must reference an existing DID when present.
    pub did_id: Option<String>,
}

/// Partial update of a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateResourceRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub payload: Option<Option<String>>,
    /// `null` detaches the resource from its DID.
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub did_id: Option<Option<String>>,
}

// =============================================================================
// Document Models
// =============================================================================

/// A document owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Document {
    /// Auto-increment identifier.
    pub id: u64,
    /// Opaque content blob.
    pub content: Option<String>,
    /// Owning user, if any.
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    pub content: Option<String>,
    /// Must reference an existing user when present.
    pub user_id: Option<u64>,
}

/// Partial update of a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDocumentRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, nullable)]
    pub content: Option<Option<String>>,
    /// `null` detaches the document from its user.
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u64>, nullable)]
    pub user_id: Option<Option<u64>>,
}

// =============================================================================
// Document Transaction Models
// =============================================================================

/// A transaction recorded against a document.
///
/// `user_id` is stored as given; it is not checked against the users table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DocumentTransaction {
    /// Auto-increment identifier.
    pub id: u64,
    /// Opaque transaction payload.
    #[schema(value_type = Option<Object>)]
    pub transaction: Option<serde_json::Value>,
    /// Parent document, if any.
    pub document_id: Option<u64>,
    pub user_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to record a document transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateDocumentTransactionRequest {
    #[schema(value_type = Option<Object>)]
    pub transaction: Option<serde_json::Value>,
    /// Must reference an existing document when present.
    pub document_id: Option<u64>,
    pub user_id: Option<u64>,
}

/// Partial update of a document transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateDocumentTransactionRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, nullable)]
    pub transaction: Option<Option<serde_json::Value>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u64>, nullable)]
    pub document_id: Option<Option<u64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<u64>, nullable)]
    pub user_id: Option<Option<u64>>,
}
