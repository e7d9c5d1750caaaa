// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Locally issued HS256 bearer tokens for the registry API.
//!
//! ## Auth Flow
//!
//! 1. Client registers (`POST /register`) or already has an account
//! 2. Client logs in (`POST /login`) and receives a token valid for one hour
//! 3. Client sends `Authorization: Bearer <token>` on protected routes
//! 4. Middleware verifies signature and expiry and attaches the user
//!
//! ## Security
//!
//! - Passwords are stored as argon2id hashes
//! - Tokens cannot be revoked; they expire after one hour
//! - Clock skew tolerance is 60 seconds
//! - Login failures do not reveal whether the email exists

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod token;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_auth;
pub use token::TokenIssuer;
