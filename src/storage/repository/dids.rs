// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DID repository.
//!
//! DIDs are keyed by their caller-supplied identifier. Deleting a DID keeps
//! its resources but clears their `did_id`.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};

use crate::models::{CreateDidRequest, Did, Resource, UpdateDidRequest};
use crate::storage::store::{
    decode, encode, Store, StoreError, StoreResult, DIDS, RESOURCES,
};

/// Repository for DID rows.
pub struct DidRepository<'a> {
    store: &'a Store,
}

impl<'a> DidRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a DID. Fails with `Conflict` if the identifier is taken.
    pub fn create(&self, request: CreateDidRequest) -> StoreResult<Did> {
        if request.id.trim().is_empty() {
            return Err(StoreError::Validation("DID id must not be empty".to_string()));
        }

        let write_txn = self.store.db().begin_write()?;
        let did = {
            let mut table = write_txn.open_table(DIDS)?;
            if table.get(request.id.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!("DID {}", request.id)));
            }

            let now = Utc::now();
            let did = Did {
                id: request.id,
                controller: request.controller,
                document: request.document,
                created_at: now,
                updated_at: now,
            };
            table.insert(did.id.as_str(), encode(&did)?.as_slice())?;
            did
        };
        write_txn.commit()?;
        Ok(did)
    }

    /// List every DID in identifier order.
    pub fn list(&self) -> StoreResult<Vec<Did>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DIDS)?;

        let mut dids = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            dids.push(decode(value.value())?);
        }
        Ok(dids)
    }

    /// Get a DID by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Did> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(DIDS)?;
        let did = match table.get(id)? {
            Some(value) => decode(value.value())?,
            None => return Err(StoreError::NotFound(format!("DID {id}"))),
        };
        Ok(did)
    }

    /// Apply the fields present in `request`. An explicit `null` clears.
    pub fn update(&self, id: &str, request: UpdateDidRequest) -> StoreResult<Did> {
        let write_txn = self.store.db().begin_write()?;
        let did = {
            let mut table = write_txn.open_table(DIDS)?;
            let mut did: Did = match table.get(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("DID {id}"))),
            };

            if let Some(controller) = request.controller {
                did.controller = controller;
            }
            if let Some(document) = request.document {
                did.document = document;
            }
            did.updated_at = Utc::now();

            table.insert(id, encode(&did)?.as_slice())?;
            did
        };
        write_txn.commit()?;
        Ok(did)
    }

    /// Delete a DID and clear the `did_id` of its resources.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let write_txn = self.store.db().begin_write()?;
        {
            let mut table = write_txn.open_table(DIDS)?;
            if table.remove(id)?.is_none() {
                return Err(StoreError::NotFound(format!("DID {id}")));
            }

            let mut resources = write_txn.open_table(RESOURCES)?;
            let mut detached = Vec::new();
            for entry in resources.iter()? {
                let (key, value) = entry?;
                let mut resource: Resource = decode(value.value())?;
                if resource.did_id.as_deref() == Some(id) {
                    resource.did_id = None;
                    detached.push((key.value().to_string(), encode(&resource)?));
                }
            }
            for (key, bytes) in &detached {
                resources.insert(key.as_str(), bytes.as_slice())?;
            }
            if !detached.is_empty() {
                tracing::debug!(did_id = %id, resources = detached.len(), "Detached resources from deleted DID");
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
