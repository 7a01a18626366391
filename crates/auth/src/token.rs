//! Signed, time-limited bearer token codec (HS256).

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use funnel_core::UserId;

use crate::{AccessClaims, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Issues and verifies access tokens against a single injected secret.
///
/// The secret is explicit construction-time configuration — no ambient
/// globals — so tests can run with distinct secrets side by side.
pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a token for `sub` with `role`, valid for `ttl` from now.
    pub fn issue(&self, sub: UserId, role: Role, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        jsonwebtoken::encode(&self.header, &claims, &self.encoding)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Verify signature and claims, then check expiry against `now`.
    ///
    /// Signature verification always runs first; no claim is trusted (or
    /// even surfaced) from a token whose signature does not match. Expiry is
    /// checked here rather than by the JWT library so that `now >= exp` is
    /// exact, with zero leeway.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &validation)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}
