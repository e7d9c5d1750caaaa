// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for the registry in a single embedded redb database.
//! One table per entity, plus an email index for users and a sequence table
//! for auto-increment ids.
//!
//! ## Relationships
//!
//! ```text
//! users 1 ── * documents 1 ── * document_transactions
//! dids  1 ── * resources
//! ```
//!
//! Foreign keys are optional. Writing a non-null key requires the parent to
//! exist; deleting a parent sets the children's key to null.

pub mod repository;
pub mod store;

pub use repository::{
    DidRepository, DocumentRepository, DocumentTransactionRepository, ResourceRepository,
    UserRepository,
};
pub use store::{Store, StoreError, StoreResult};
