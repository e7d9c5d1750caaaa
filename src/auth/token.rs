// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuing and verification (HS256).
//!
//! Tokens embed the user id and email and expire one hour after issue.
//! There is no revocation list: a token stays valid until `exp` whatever
//! happens to the account afterwards.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use ring::rand::{SecureRandom, SystemRandom};

use super::{claims::TokenClaims, AuthError, AuthenticatedUser};
use crate::config::JwtSecret;

/// Lifetime of issued tokens.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Length of secrets generated when none is configured.
const GENERATED_SECRET_LEN: usize = 32;

/// Signs and verifies bearer tokens with a symmetric secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer for the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Create an issuer with a fresh random secret from the OS CSPRNG.
    pub fn generate() -> Result<Self, AuthError> {
        let mut secret = [0u8; GENERATED_SECRET_LEN];
        SystemRandom::new()
            .fill(&mut secret)
            .map_err(|_| AuthError::InternalError("secure random source unavailable".into()))?;
        Ok(Self::new(&secret))
    }

    /// Build the issuer described by configuration.
    pub fn from_config(secret: &JwtSecret) -> Result<Self, AuthError> {
        match secret {
            JwtSecret::Configured(bytes) => Ok(Self::new(bytes)),
            JwtSecret::Generated => {
                tracing::warn!(
                    "JWT_SECRET not set; using a random secret. Tokens will not survive a restart"
                );
                Self::generate()
            }
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a token for a user with the standard one hour lifetime.
    pub fn issue(&self, user_id: u64, email: &str) -> Result<String, AuthError> {
        self.issue_with_ttl(user_id, email, self.ttl)
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_with_ttl(
        &self,
        user_id: u64,
        email: &str,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(format!("token signing failed: {e}")))
    }

    /// Verify signature and expiry and return the embedded user.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        AuthenticatedUser::from_claims(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"test-secret")
    }

    #[test]
    fn issued_token_verifies() {
        let issuer = issuer();
        let token = issuer.issue(7, "a@x.com").unwrap();

        let user = issuer.verify(&token).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.email, "a@x.com");

        let remaining = user.expires_at - Utc::now().timestamp();
        assert!(remaining > TOKEN_TTL_SECS - 10 && remaining <= TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let token = issuer
            .issue_with_ttl(7, "a@x.com", Duration::hours(-2))
            .unwrap();
        assert!(matches!(issuer.verify(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenIssuer::new(b"other-secret").issue(7, "a@x.com").unwrap();
        assert!(matches!(
            issuer().verify(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue(7, "a@x.com").unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = format!(
            r#"{{"sub":"1","email":"admin@x.com","iat":{},"exp":{}}}"#,
            Utc::now().timestamp(),
            Utc::now().timestamp() + 3600
        );
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_claims.as_bytes()),
            parts[2]
        );

        assert!(matches!(
            issuer.verify(&forged),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            issuer().verify("not-a-token"),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn generated_issuers_do_not_share_secrets() {
        let first = TokenIssuer::generate().unwrap();
        let second = TokenIssuer::generate().unwrap();
        let token = first.issue(1, "a@x.com").unwrap();

        assert!(first.verify(&token).is_ok());
        assert!(second.verify(&token).is_err());
    }

    #[test]
    fn configured_secret_round_trips_between_issuers() {
        let secret = JwtSecret::Configured(b"shared".to_vec());
        let token = TokenIssuer::from_config(&secret)
            .unwrap()
            .issue(3, "c@x.com")
            .unwrap();
        let user = TokenIssuer::from_config(&secret).unwrap().verify(&token).unwrap();
        assert_eq!(user.user_id, 3);
    }
}
