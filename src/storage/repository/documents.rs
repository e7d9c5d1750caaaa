// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document repository.
//!
//! Documents get auto-increment ids and optionally belong to a user.
//! Deleting a document keeps its transactions but clears their
//! `document_id`.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};

use crate::models::{
    CreateDocumentRequest, Document, DocumentTransaction, UpdateDocumentRequest,
};
use crate::storage::store::{
    decode, detach_children, encode, next_id, Store, StoreError, StoreResult, DOCUMENTS,
    DOCUMENT_TRANSACTIONS, USERS,
};

const SEQUENCE: &str = "documents";

/// Repository for document rows.
pub struct DocumentRepository<'a> {
    store: &'a Store,
}

impl<'a> DocumentRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a document.
    pub fn create(&self, request: CreateDocumentRequest) -> StoreResult<Document> {
        let write_txn = self.store.db().begin_write()?;
        let document = {
            if let Some(user_id) = request.user_id {
                ensure_user_exists(&write_txn, user_id)?;
            }

            let id = next_id(&write_txn, SEQUENCE)?;
            let now = Utc::now();
            let document = Document {
                id,
                content: request.content,
                user_id: request.user_id,
                created_at: now,
                updated_at: now,
            };

            let mut table = write_txn.open_table(DOCUMENTS)?;
            table.insert(id, encode(&document)?.as_slice())?;
            document
        };
        write_txn.commit()?;
        Ok(document)
    }

    /// List every document in id order.
    pub fn list(&self) -> StoreResult<Vec<Document>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DOCUMENTS)?;

        let mut documents = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            documents.push(decode(value.value())?);
        }
        Ok(documents)
    }

    /// Get a document by id.
    pub fn get(&self, id: u64) -> StoreResult<Document> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DOCUMENTS)?;
        let document = match table.get(id)? {
            Some(value) => decode(value.value())?,
            None => return Err(StoreError::NotFound(format!("Document {id}"))),
        };
        Ok(document)
    }

    /// Apply the fields present in `request`. An explicit `null` clears.
    pub fn update(&self, id: u64, request: UpdateDocumentRequest) -> StoreResult<Document> {
        let write_txn = self.store.db().begin_write()?;
        let document = {
            let mut table = write_txn.open_table(DOCUMENTS)?;
            let mut document: Document = match table.get(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("Document {id}"))),
            };

            if let Some(Some(user_id)) = request.user_id {
                ensure_user_exists(&write_txn, user_id)?;
            }

            if let Some(content) = request.content {
                document.content = content;
            }
            if let Some(user_id) = request.user_id {
                document.user_id = user_id;
            }
            document.updated_at = Utc::now();

            table.insert(id, encode(&document)?.as_slice())?;
            document
        };
        write_txn.commit()?;
        Ok(document)
    }

    /// Delete a document and clear the `document_id` of its transactions.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let write_txn = self.store.db().begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENTS)?;
            if table.remove(id)?.is_none() {
                return Err(StoreError::NotFound(format!("Document {id}")));
            }

            let mut transactions = write_txn.open_table(DOCUMENT_TRANSACTIONS)?;
            let detached = detach_children(&mut transactions, |tx: &mut DocumentTransaction| {
                if tx.document_id == Some(id) {
                    tx.document_id = None;
                    true
                } else {
                    false
                }
            })?;
            if detached > 0 {
                tracing::debug!(document_id = id, transactions = detached, "Detached transactions from deleted document");
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

fn ensure_user_exists(write_txn: &WriteTransaction, user_id: u64) -> StoreResult<()> {
    let users = write_txn.open_table(USERS)?;
    if users.get(user_id)?.is_none() {
        return Err(StoreError::ForeignKey(format!("User {user_id} does not exist")));
    }
    Ok(())
}
