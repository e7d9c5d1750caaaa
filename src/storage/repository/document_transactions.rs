// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document transaction repository.
//!
//! Only `document_id` is a foreign key. `user_id` is stored as an ordinary
//! attribute and is never checked against the users table.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};

use crate::models::{
    CreateDocumentTransactionRequest, DocumentTransaction, UpdateDocumentTransactionRequest,
};
use crate::storage::store::{
    decode, encode, next_id, Store, StoreError, StoreResult, DOCUMENTS, DOCUMENT_TRANSACTIONS,
};

const SEQUENCE: &str = "document_transactions";

/// Repository for document transaction rows.
pub struct DocumentTransactionRepository<'a> {
    store: &'a Store,
}

impl<'a> DocumentTransactionRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Record a transaction.
    pub fn create(
        &self,
        request: CreateDocumentTransactionRequest,
    ) -> StoreResult<DocumentTransaction> {
        let write_txn = self.store.db().begin_write()?;
        let transaction = {
            if let Some(document_id) = request.document_id {
                ensure_document_exists(&write_txn, document_id)?;
            }

            let id = next_id(&write_txn, SEQUENCE)?;
            let now = Utc::now();
            let transaction = DocumentTransaction {
                id,
                transaction: request.transaction,
                document_id: request.document_id,
                user_id: request.user_id,
                created_at: now,
                updated_at: now,
            };

            let mut table = write_txn.open_table(DOCUMENT_TRANSACTIONS)?;
            table.insert(id, encode(&transaction)?.as_slice())?;
            transaction
        };
        write_txn.commit()?;
        Ok(transaction)
    }

    /// List every transaction in id order.
    pub fn list(&self) -> StoreResult<Vec<DocumentTransaction>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DOCUMENT_TRANSACTIONS)?;

        let mut transactions = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            transactions.push(decode(value.value())?);
        }
        Ok(transactions)
    }

    /// Get a transaction by id.
    pub fn get(&self, id: u64) -> StoreResult<DocumentTransaction> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DOCUMENT_TRANSACTIONS)?;
        let transaction = match table.get(id)? {
            Some(value) => decode(value.value())?,
            None => return Err(StoreError::NotFound(format!("DocumentTransaction {id}"))),
        };
        Ok(transaction)
    }

    /// Apply the fields present in `request`. An explicit `null` clears.
    pub fn update(
        &self,
        id: u64,
        request: UpdateDocumentTransactionRequest,
    ) -> StoreResult<DocumentTransaction> {
        let write_txn = self.store.db().begin_write()?;
        let transaction = {
            let mut table = write_txn.open_table(DOCUMENT_TRANSACTIONS)?;
            let mut transaction: DocumentTransaction = match table.get(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("DocumentTransaction {id}"))),
            };

            if let Some(Some(document_id)) = request.document_id {
                ensure_document_exists(&write_txn, document_id)?;
            }

            if let Some(payload) = request.transaction {
                transaction.transaction = payload;
            }
            if let Some(document_id) = request.document_id {
                transaction.document_id = document_id;
            }
            if let Some(user_id) = request.user_id {
                transaction.user_id = user_id;
            }
            transaction.updated_at = Utc::now();

            table.insert(id, encode(&transaction)?.as_slice())?;
            transaction
        };
        write_txn.commit()?;
        Ok(transaction)
    }

    /// Delete a transaction.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let write_txn = self.store.db().begin_write()?;
        {
            let mut table = write_txn.open_table(DOCUMENT_TRANSACTIONS)?;
            if table.remove(id)?.is_none() {
                return Err(StoreError::NotFound(format!("DocumentTransaction {id}")));
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

fn ensure_document_exists(write_txn: &WriteTransaction, document_id: u64) -> StoreResult<()> {
    let documents = write_txn.open_table(DOCUMENTS)?;
    if documents.get(document_id)?.is_none() {
        return Err(StoreError::ForeignKey(format!(
            "Document {document_id} does not exist"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateDocumentRequest;
    use crate::storage::DocumentRepository;
    use serde_json::json;

    fn temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("doc-tx.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn create_and_get_transaction() {
        let (store, _dir) = temp_store();
        let document = DocumentRepository::new(&store)
            .create(CreateDocumentRequest::default())
            .unwrap();
        let repo = DocumentTransactionRepository::new(&store);

        let created = repo
            .create(CreateDocumentTransactionRequest {
                transaction: Some(json!({"hash": "0xabc", "op": "anchor"})),
                document_id: Some(document.id),
                user_id: Some(7),
            })
            .unwrap();
        assert_eq!(repo.get(created.id).unwrap(), created);
    }

    #[test]
    fn user_id_is_not_a_foreign_key() {
        let (store, _dir) = temp_store();
        let repo = DocumentTransactionRepository::new(&store);

        let created = repo
            .create(CreateDocumentTransactionRequest {
                transaction: None,
                document_id: None,
                user_id: Some(12345),
            })
            .unwrap();
        assert_eq!(created.user_id, Some(12345));
    }

    #[test]
    fn unknown_document_is_rejected() {
        let (store, _dir) = temp_store();
        let repo = DocumentTransactionRepository::new(&store);

        let result = repo.create(CreateDocumentTransactionRequest {
            transaction: None,
            document_id: Some(5),
            user_id: None,
        });
        assert!(matches!(result, Err(StoreError::ForeignKey(_))));
    }

    #[test]
    fn update_replaces_payload_and_keeps_links() {
        let (store, _dir) = temp_store();
        let document = DocumentRepository::new(&store)
            .create(CreateDocumentRequest::default())
            .unwrap();
        let repo = DocumentTransactionRepository::new(&store);
        let created = repo
            .create(CreateDocumentTransactionRequest {
                transaction: Some(json!({"v": 1})),
                document_id: Some(document.id),
                user_id: None,
            })
            .unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateDocumentTransactionRequest {
                    transaction: Some(Some(json!({"v": 2}))),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.transaction, Some(json!({"v": 2})));
        assert_eq!(updated.document_id, Some(document.id));

        let detached = repo
            .update(
                created.id,
                UpdateDocumentTransactionRequest {
                    document_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(detached.document_id, None);
        assert_eq!(detached.transaction, Some(json!({"v": 2})));
    }

    #[test]
    fn update_of_missing_transaction_is_not_found_before_foreign_key() {
        let (store, _dir) = temp_store();
        let repo = DocumentTransactionRepository::new(&store);

        let result = repo.update(
            8,
            UpdateDocumentTransactionRequest {
                document_id: Some(Some(404)),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_is_not_repeatable() {
        let (store, _dir) = temp_store();
        let repo = DocumentTransactionRepository::new(&store);
        let created = repo
            .create(CreateDocumentTransactionRequest::default())
            .unwrap();

        repo.delete(created.id).unwrap();
        assert!(matches!(repo.delete(created.id), Err(StoreError::NotFound(_))));
        assert!(repo.list().unwrap().is_empty());
    }
}
