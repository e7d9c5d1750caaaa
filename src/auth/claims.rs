// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by tokens issued at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the user id, as a decimal string
    pub sub: String,

    /// Email the user logged in with
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated user information extracted from a verified token.
///
/// This is the type handlers see for the user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: u64,

    pub email: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = claims
            .sub
            .parse::<u64>()
            .map_err(|_| AuthError::MalformedToken)?;

        Ok(Self {
            user_id,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: "42".to_string(),
            email: "a@x.com".to_string(),
            iat: 1700000000,
            exp: 1700003600,
        }
    }

    #[test]
    fn from_claims_extracts_user() {
        let user = AuthenticatedUser::from_claims(sample_claims()).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.expires_at, 1700003600);
    }

    #[test]
    fn non_numeric_subject_is_malformed() {
        let mut claims = sample_claims();
        claims.sub = "user_abc".to_string();
        assert!(matches!(
            AuthenticatedUser::from_claims(claims),
            Err(AuthError::MalformedToken)
        ));
    }
}
