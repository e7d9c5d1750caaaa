// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Users live in the `users` table keyed by auto-increment id. The
//! `user_emails` index keeps emails unique and backs login lookups; it is
//! maintained in the same transaction as every user write.

use chrono::Utc;
use redb::{ReadableDatabase, ReadableTable};

use crate::models::{CreateUserRequest, Document, UpdateUserRequest, User};
use crate::storage::store::{
    decode, detach_children, email_key, encode, next_id, Store, StoreError, StoreResult,
    DOCUMENTS, USERS, USER_EMAILS,
};

const SEQUENCE: &str = "users";

/// Repository for user rows.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a user. `password_hash` replaces the plaintext in `request`.
    pub fn create(&self, request: CreateUserRequest, password_hash: String) -> StoreResult<User> {
        let key = email_key(&request.email);
        if key.is_empty() {
            return Err(StoreError::Validation("email must not be empty".to_string()));
        }

        let write_txn = self.store.db().begin_write()?;
        let user = {
            let id = next_id(&write_txn, SEQUENCE)?;

            let mut emails = write_txn.open_table(USER_EMAILS)?;
            if emails.get(key.as_str())?.is_some() {
                return Err(StoreError::Conflict(format!(
                    "User with email {}",
                    request.email
                )));
            }

            let now = Utc::now();
            let user = User {
                id,
                name: request.name,
                email: request.email,
                phone: request.phone,
                pin: request.pin,
                date_of_birth: request.date_of_birth,
                national_id_numbers: request.national_id_numbers,
                image: request.image,
                password: password_hash,
                created_at: now,
                updated_at: now,
            };

            let mut users = write_txn.open_table(USERS)?;
            users.insert(id, encode(&user)?.as_slice())?;
            emails.insert(key.as_str(), id)?;
            user
        };
        write_txn.commit()?;
        Ok(user)
    }

    /// List every user in id order.
    pub fn list(&self) -> StoreResult<Vec<User>> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(USERS)?;

        let mut users = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            users.push(decode(value.value())?);
        }
        Ok(users)
    }

    /// Get a user by id.
    pub fn get(&self, id: u64) -> StoreResult<User> {
        let read_txn = self.store.db().begin_read()?;
        let table = read_txn.open_table(USERS)?;
        let user = match table.get(id)? {
            Some(value) => decode(value.value())?,
            None => return Err(StoreError::NotFound(format!("User {id}"))),
        };
        Ok(user)
    }

    /// Look up a user by email (case-insensitive).
    pub fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let key = email_key(email);
        let read_txn = self.store.db().begin_read()?;
        let emails = read_txn.open_table(USER_EMAILS)?;
        let id = match emails.get(key.as_str())? {
            Some(value) => value.value(),
            None => return Ok(None),
        };

        let users = read_txn.open_table(USERS)?;
        let user = match users.get(id)? {
            Some(value) => Some(decode(value.value())?),
            None => None,
        };
        Ok(user)
    }

    /// Apply the fields present in `request`. `password_hash`, when given,
    /// replaces the stored hash.
    pub fn update(
        &self,
        id: u64,
        request: UpdateUserRequest,
        password_hash: Option<String>,
    ) -> StoreResult<User> {
        let write_txn = self.store.db().begin_write()?;
        let user = {
            let mut users = write_txn.open_table(USERS)?;
            let mut user: User = match users.get(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("User {id}"))),
            };

            if let Some(email) = request.email {
                let old_key = email_key(&user.email);
                let new_key = email_key(&email);
                if new_key.is_empty() {
                    return Err(StoreError::Validation("email must not be empty".to_string()));
                }
                if new_key != old_key {
                    let mut emails = write_txn.open_table(USER_EMAILS)?;
                    if emails.get(new_key.as_str())?.is_some() {
                        return Err(StoreError::Conflict(format!("User with email {email}")));
                    }
                    emails.remove(old_key.as_str())?;
                    emails.insert(new_key.as_str(), id)?;
                }
                user.email = email;
            }

            if let Some(name) = request.name {
                user.name = name;
            }
            if let Some(hash) = password_hash {
                user.password = hash;
            }
            if let Some(phone) = request.phone {
                user.phone = phone;
            }
            if let Some(pin) = request.pin {
                user.pin = pin;
            }
            if let Some(date_of_birth) = request.date_of_birth {
                user.date_of_birth = date_of_birth;
            }
            if let Some(numbers) = request.national_id_numbers {
                user.national_id_numbers = numbers;
            }
            if let Some(image) = request.image {
                user.image = image;
            }
            user.updated_at = Utc::now();

            users.insert(id, encode(&user)?.as_slice())?;
            user
        };
        write_txn.commit()?;
        Ok(user)
    }

    /// Delete a user. Documents owned by the user are kept with a null owner.
    pub fn delete(&self, id: u64) -> StoreResult<()> {
        let write_txn = self.store.db().begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let removed: User = match users.remove(id)? {
                Some(value) => decode(value.value())?,
                None => return Err(StoreError::NotFound(format!("User {id}"))),
            };

            let mut emails = write_txn.open_table(USER_EMAILS)?;
            emails.remove(email_key(&removed.email).as_str())?;

            let mut documents = write_txn.open_table(DOCUMENTS)?;
            let detached = detach_children(&mut documents, |document: &mut Document| {
                if document.user_id == Some(id) {
                    document.user_id = None;
                    true
                } else {
                    false
                }
            })?;
            if detached > 0 {
                tracing::debug!(user_id = id, documents = detached, "Detached documents from deleted user");
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateDocumentRequest;
    use crate::storage::DocumentRepository;

    fn temp_store() -> (Store, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(&dir.path().join("users.redb")).unwrap();
        (store, dir)
    }

    fn user_request(email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: "plaintext".to_string(),
            phone: Some("+2348000000000".to_string()),
            pin: None,
            date_of_birth: None,
            national_id_numbers: vec!["NIN-1".to_string()],
            image: None,
        }
    }

    #[test]
    fn create_and_get_user() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);

        let created = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.password, "hash");

        let loaded = repo.get(created.id).unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);

        repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();
        let result = repo.create(user_request("ADA@example.com"), "hash".to_string());
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(repo.list().unwrap().len(), 1);
    }

    #[test]
    fn find_by_email_ignores_case() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);
        let created = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();

        let found = repo.find_by_email("Ada@Example.com").unwrap();
        assert_eq!(found.map(|u| u.id), Some(created.id));
        assert!(repo.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn update_changes_only_present_fields() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);
        let created = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();

        let updated = repo
            .update(
                created.id,
                UpdateUserRequest {
                    name: Some("Ada Lovelace".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();

        assert_eq!(updated.name, "Ada Lovelace");
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.password, "hash");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_with_null_clears_optional_fields() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);
        let created = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();

        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"phone":null,"image":null}"#).unwrap();
        let updated = repo.update(created.id, request, None).unwrap();

        assert_eq!(updated.phone, None);
        assert_eq!(updated.image, None);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.pin, created.pin);
    }

    #[test]
    fn update_email_moves_index_entry() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);
        let created = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();
        repo.create(user_request("grace@example.com"), "hash".to_string()).unwrap();

        let taken = repo.update(
            created.id,
            UpdateUserRequest {
                email: Some("grace@example.com".to_string()),
                ..Default::default()
            },
            None,
        );
        assert!(matches!(taken, Err(StoreError::Conflict(_))));

        repo.update(
            created.id,
            UpdateUserRequest {
                email: Some("lovelace@example.com".to_string()),
                ..Default::default()
            },
            None,
        )
        .unwrap();

        assert!(repo.find_by_email("ada@example.com").unwrap().is_none());
        assert!(repo.find_by_email("lovelace@example.com").unwrap().is_some());
    }

    #[test]
    fn missing_user_is_not_found() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);

        assert!(matches!(repo.get(42), Err(StoreError::NotFound(_))));
        assert!(matches!(
            repo.update(42, UpdateUserRequest::default(), None),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(repo.delete(42), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_releases_email_and_orphans_documents() {
        let (store, _dir) = temp_store();
        let repo = UserRepository::new(&store);
        let user = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();

        let documents = DocumentRepository::new(&store);
        let document = documents
            .create(CreateDocumentRequest {
                content: Some("body".to_string()),
                user_id: Some(user.id),
            })
            .unwrap();

        repo.delete(user.id).unwrap();
        assert!(matches!(repo.delete(user.id), Err(StoreError::NotFound(_))));
        assert!(repo.find_by_email("ada@example.com").unwrap().is_none());
        assert_eq!(documents.get(document.id).unwrap().user_id, None);

        // Email can be registered again and ids are not reused.
        let again = repo.create(user_request("ada@example.com"), "hash".to_string()).unwrap();
        assert_eq!(again.id, user.id + 1);
    }
}
