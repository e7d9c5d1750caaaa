// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource repository.
//!
//! Resources are keyed by caller-supplied identifier and optionally point at
//! a DID. The DID must exist whenever `did_id` is written.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable, WriteTransaction};

use crate::models::{CreateResourceRequest, Resource, UpdateResourceRequest};
use crate::storage::store::{
    decode, encode, Store, StoreError, StoreResult, DIDS, RESOURCES,
};

/// Repository for resource rows.
pub struct ResourceRepository<'a> {
    store: &'a Store,
}

impl<'a> ResourceRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a resource.
    pub fn create(&self, request: CreateResourceRequest) -> StoreResult<Resource> {
        if request.id.trim().is_empty() {
            return Err(StoreError::Validation("Resource id must not be empty".to_string()));
        }

        let write_txn = self.store.db().begin_write()?;
        let resource = {
            if let Some(did_id) = &request.did_id {
                ensure_did_exists(&write_txn, did_id)?;
            }

            let mut table = write_txn.open_table(RESOURCES)?;
            if table.get(request.id.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!("Resource {}", request.id)));
            }

            let now = Utc::now();
            let resource = Resource {
                id: request.id,
                payload: request.payload,
                did_id: request.did_id,
                created_at: now,
                updated_at: now,
            };
            table.insert(resource.id.as_str(), encode(&resource)?.as_slice())?;
            resource
        };
        write_txn.commit()?;
        Ok(resource)
    }

    /// List every resource in identifier order.
    pub fn list(&self) -> StoreResult<Vec<Resource>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(RESOURCES)?;

        let mut resources = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            resources.push(decode(value.value())?);
        }
        Ok(resources)
    }

    /// Get a resource by identifier.
    pub fn get(&self, id: &str) -> StoreResult<Resource> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(RESOURCES)?;
        let resource = match table.get(id)? {
            Some(value) => decode(value.value())?,
            None => return Err(StoreError::NotFound(format!("Resource {id}"))),
        };
        Ok(resource)
    }

    /// Apply the fields present in `request`. An explicit `null` clears.
    pub fn update(&self, id: &str, request: UpdateResourceRequest) -> StoreResult<Resource> {
        let write_txn = self.store.db().begin_write()?;
        let resource = {
            let mut table = write_txn.open_table(RESOURCES)?;
            let mut resource: Resource = match table.get(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("Resource {id}"))),
            };

            if let Some(Some(did_id)) = &request.did_id {
                ensure_did_exists(&write_txn, did_id)?;
            }

            if let Some(payload) = request.payload {
                resource.payload = payload;
            }
            if let Some(did_id) = request.did_id {
                resource.did_id = did_id;
            }
            resource.updated_at = Utc::now();

            table.insert(id, encode(&resource)?.as_slice())?;
            resource
        };
        write_txn.commit()?;
        Ok(resource)
    }

    /// Delete a resource.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let write_txn = self.store.db().begin_write()?;
        {
            let mut table = write_txn.open_table(RESOURCES)?;
            if table.remove(id)?.is_none() {
                return Err(StoreError::NotFound(format!("Resource {id}")));
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

fn ensure_did_exists(write_txn: &WriteTransaction, did_id: &str) -> StoreResult<()> {
    let dids = write_txn.open_table(DIDS)?;
    if dids.get(did_id)?.is_none() {
        return Err(StoreError::ForeignKey(format!("DID {did_id} does not exist")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateDidRequest;
    use crate::storage::DidRepository;

    fn temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("resources.redb")).unwrap();
        (store, dir)
    }

    fn seed_did(store: &Store, id: &str) {
        DidRepository::new(store)
            .create(CreateDidRequest {
                id: id.to_string(),
                controller: None,
                document: None,
            })
            .unwrap();
    }

    fn resource_request(id: &str, did_id: Option<&str>) -> CreateResourceRequest {
        CreateResourceRequest {
            id: id.to_string(),
            payload: Some("service endpoint".to_string()),
            did_id: did_id.map(str::to_string),
        }
    }

    #[test]
    fn create_and_get_resource() {
        let (store, _dir) = temp_store();
        seed_did(&store, "did:example:1");
        let repo = ResourceRepository::new(&store);

        let created = repo.create(resource_request("r-1", Some("did:example:1"))).unwrap();
        assert_eq!(repo.get("r-1").unwrap(), created);
    }

    #[test]
    fn resource_without_did_is_allowed() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);
        let created = repo.create(resource_request("r-1", None)).unwrap();
        assert!(created.did_id.is_none());
    }

    #[test]
    fn unknown_did_is_a_foreign_key_violation() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);

        assert!(matches!(
            repo.create(resource_request("r-1", Some("did:example:missing"))),
            Err(StoreError::ForeignKey(_))
        ));
        assert!(repo.list().unwrap().is_empty());

        repo.create(resource_request("r-1", None)).unwrap();
        assert!(matches!(
            repo.update(
                "r-1",
                UpdateResourceRequest {
                    did_id: Some(Some("did:example:missing".to_string())),
                    ..Default::default()
                }
            ),
            Err(StoreError::ForeignKey(_))
        ));
    }

    #[test]
    fn update_of_missing_resource_is_not_found_before_foreign_key() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);

        let result = repo.update(
            "nope",
            UpdateResourceRequest {
                did_id: Some(Some("did:missing".to_string())),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn update_with_null_did_detaches_resource() {
        let (store, _dir) = temp_store();
        seed_did(&store, "did:example:1");
        let repo = ResourceRepository::new(&store);
        repo.create(resource_request("r-1", Some("did:example:1"))).unwrap();

        let updated = repo
            .update(
                "r-1",
                UpdateResourceRequest {
                    did_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.did_id, None);
        assert_eq!(updated.payload.as_deref(), Some("service endpoint"));

        let untouched = repo.update("r-1", UpdateResourceRequest::default()).unwrap();
        assert_eq!(untouched.payload.as_deref(), Some("service endpoint"));
        assert_eq!(repo.get("r-1").unwrap().did_id, None);
    }

    #[test]
    fn duplicate_id_is_a_conflict() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);
        repo.create(resource_request("r-1", None)).unwrap();
        assert!(matches!(
            repo.create(resource_request("r-1", None)),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn list_returns_identifier_order() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);
        for id in ["r-b", "r-a", "r-c"] {
            repo.create(resource_request(id, None)).unwrap();
        }
        let ids: Vec<String> = repo.list().unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r-a", "r-b", "r-c"]);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let (store, _dir) = temp_store();
        let repo = ResourceRepository::new(&store);
        repo.create(resource_request("r-1", None)).unwrap();

        repo.delete("r-1").unwrap();
        assert!(matches!(repo.get("r-1"), Err(StoreError::NotFound(_))));
        assert!(matches!(repo.delete("r-1"), Err(StoreError::NotFound(_))));
    }
}
