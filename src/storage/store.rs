// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded registry database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: id → serialized User
//! - `user_emails`: lowercase email → user id (uniqueness index)
//! - `dids`: did → serialized Did
//! - `resources`: resource id → serialized Resource
//! - `documents`: id → serialized Document
//! - `document_transactions`: id → serialized DocumentTransaction
//! - `sequences`: table name → last allocated id

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, Table, TableDefinition, WriteTransaction};
use serde::{de::DeserializeOwned, Serialize};

// =============================================================================
// Table Definitions
// =============================================================================

pub(crate) const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

pub(crate) const USER_EMAILS: TableDefinition<&str, u64> = TableDefinition::new("user_emails");

pub(crate) const DIDS: TableDefinition<&str, &[u8]> = TableDefinition::new("dids");

pub(crate) const RESOURCES: TableDefinition<&str, &[u8]> = TableDefinition::new("resources");

pub(crate) const DOCUMENTS: TableDefinition<u64, &[u8]> = TableDefinition::new("documents");

pub(crate) const DOCUMENT_TRANSACTIONS: TableDefinition<u64, &[u8]> =
    TableDefinition::new("document_transactions");

/// Auto-increment counters, keyed by the table they allocate for.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Row does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Primary key or unique index already taken.
    #[error("{0} already exists")]
    Conflict(String),

    /// Foreign key points at a row that does not exist.
    #[error("{0}")]
    ForeignKey(String),

    /// Row rejected before it reached the database.
    #[error("{0}")]
    Validation(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Store
// =============================================================================

/// Storage handle shared by every repository.
pub struct Store {
    db: Database,
}

impl Store {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        let store = Self { db };
        store.create_tables()?;
        Ok(store)
    }

    /// Pre-create all tables so later read transactions don't fail.
    fn create_tables(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USER_EMAILS)?;
            let _ = write_txn.open_table(DIDS)?;
            let _ = write_txn.open_table(RESOURCES)?;
            let _ = write_txn.open_table(DOCUMENTS)?;
            let _ = write_txn.open_table(DOCUMENT_TRANSACTIONS)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Drop every table (rows and sequences) and recreate the empty schema.
    pub fn reset(&self) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(USERS)?;
        write_txn.delete_table(USER_EMAILS)?;
        write_txn.delete_table(DIDS)?;
        write_txn.delete_table(RESOURCES)?;
        write_txn.delete_table(DOCUMENTS)?;
        write_txn.delete_table(DOCUMENT_TRANSACTIONS)?;
        write_txn.delete_table(SEQUENCES)?;
        write_txn.commit()?;

        self.create_tables()
    }

    /// Verify the database can serve a read transaction.
    pub fn health_check(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }
}

// =============================================================================
// Row Helpers
// =============================================================================

pub(crate) fn encode<T: Serialize>(row: &T) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(row)?)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Allocate the next id for `sequence` inside the caller's transaction.
///
/// Ids start at 1 and are never reused, even after deletes.
pub(crate) fn next_id(write_txn: &WriteTransaction, sequence: &str) -> StoreResult<u64> {
    let mut table = write_txn.open_table(SEQUENCES)?;
    let next = table.get(sequence)?.map(|v| v.value()).unwrap_or(0) + 1;
    table.insert(sequence, next)?;
    Ok(next)
}

/// Rewrite every row of an id-keyed table for which `detach` reports a change.
///
/// Used to null out foreign keys when a parent row is deleted.
pub(crate) fn detach_children<T, F>(
    table: &mut Table<'_, u64, &'static [u8]>,
    mut detach: F,
) -> StoreResult<usize>
where
    T: Serialize + DeserializeOwned,
    F: FnMut(&mut T) -> bool,
{
    let mut changed = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        let mut row: T = decode(value.value())?;
        if detach(&mut row) {
            changed.push((key.value(), encode(&row)?));
        }
    }

    let count = changed.len();
    for (key, bytes) in changed {
        table.insert(key, bytes.as_slice())?;
    }
    Ok(count)
}

/// Normalized key for the email uniqueness index.
pub(crate) fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("test.redb")).unwrap();
        (store, dir)
    }

    #[test]
    fn sequences_start_at_one_and_increase() {
        let (store, _dir) = temp_store();
        let write_txn = store.db().begin_write().unwrap();
        assert_eq!(next_id(&write_txn, "users").unwrap(), 1);
        assert_eq!(next_id(&write_txn, "users").unwrap(), 2);
        assert_eq!(next_id(&write_txn, "documents").unwrap(), 1);
        write_txn.commit().unwrap();

        let write_txn = store.db().begin_write().unwrap();
        assert_eq!(next_id(&write_txn, "users").unwrap(), 3);
    }

    #[test]
    fn aborted_transaction_does_not_consume_ids() {
        let (store, _dir) = temp_store();
        {
            let write_txn = store.db().begin_write().unwrap();
            assert_eq!(next_id(&write_txn, "users").unwrap(), 1);
            write_txn.abort().unwrap();
        }
        let write_txn = store.db().begin_write().unwrap();
        assert_eq!(next_id(&write_txn, "users").unwrap(), 1);
    }

    #[test]
    fn reset_clears_rows_and_sequences() {
        let (store, _dir) = temp_store();
        let write_txn = store.db().begin_write().unwrap();
        {
            let id = next_id(&write_txn, "documents").unwrap();
            let mut table = write_txn.open_table(DOCUMENTS).unwrap();
            table.insert(id, b"{}".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        store.reset().unwrap();

        let read_txn = store.db().begin_read().unwrap();
        let table = read_txn.open_table(DOCUMENTS).unwrap();
        assert_eq!(table.iter().unwrap().count(), 0);
        drop(table);
        drop(read_txn);

        let write_txn = store.db().begin_write().unwrap();
        assert_eq!(next_id(&write_txn, "documents").unwrap(), 1);
    }

    #[test]
    fn open_reports_unusable_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let result = Store::open(&blocker.join("registry.redb"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn health_check_passes_on_open_store() {
        let (store, _dir) = temp_store();
        assert!(store.health_check().is_ok());
    }

    #[test]
    fn email_key_is_case_insensitive() {
        assert_eq!(email_key("  A@X.com "), "a@x.com");
    }
}
