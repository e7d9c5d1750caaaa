// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the registry database.
//!
//! Each repository provides CRUD operations for one entity type and borrows
//! the shared [`Store`](super::Store) handle. Foreign keys are checked
//! inside the same write transaction as the row they guard.

pub mod dids;
pub mod document_transactions;
pub mod documents;
pub mod resources;
pub mod users;

pub use dids::DidRepository;
pub use document_transactions::DocumentTransactionRepository;
pub use documents::DocumentRepository;
pub use resources::ResourceRepository;
pub use users::UserRepository;
