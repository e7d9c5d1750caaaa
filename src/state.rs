// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{auth::TokenIssuer, storage::Store};

/// Shared state handed to every handler.
///
/// Holds the storage handle and the token issuer. Both are immutable after
/// startup, so cloning the state only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Store>,
    tokens: Arc<TokenIssuer>,
}

impl AppState {
    pub fn new(store: Store, tokens: TokenIssuer) -> Self {
        Self {
            store: Arc::new(store),
            tokens: Arc::new(tokens),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// Secret shared by every test state.
    pub const TEST_SECRET: &[u8] = b"test-secret";

    /// State backed by a throwaway database. Keep the `TempDir` alive for
    /// the duration of the test.
    pub fn test_state() -> (AppState, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Store::open(&temp_dir.path().join("registry.redb"))
            .expect("Failed to open store");
        let state = AppState::new(store, TokenIssuer::new(TEST_SECRET));
        (state, temp_dir)
    }
}
