// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DID Registry - REST service for users, DIDs, resources and documents
//!
//! Thin CRUD API over five related entities stored in an embedded redb
//! database, with HS256 bearer-token authentication and Swagger docs.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `auth` - Password hashing, token issuing, and the auth middleware
//! - `storage` - redb tables and per-entity repositories
//! - `config` - Environment-driven runtime configuration

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;
